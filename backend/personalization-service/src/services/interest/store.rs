// ============================================
// Interest Store (兴趣存储)
// ============================================
//
// Persistence seam for interest vectors. A save is always a whole-record
// overwrite; the tracker serializes read-modify-write per key.
//
// Redis keys:
// - {prefix}:{user_id}:{subject_id} - JSON-encoded InterestVector

use super::{InterestError, InterestVector, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestStore: Send + Sync {
    /// Stored vector, or `None` when the pair has never interacted
    async fn load(&self, user_id: Uuid, subject_id: Uuid) -> Result<Option<InterestVector>>;

    /// Atomically replace the stored vector
    async fn save(&self, user_id: Uuid, subject_id: Uuid, vector: &InterestVector) -> Result<()>;
}

/// Process-local store, used by tests and single-node deployments
#[derive(Default)]
pub struct InMemoryInterestStore {
    records: DashMap<(Uuid, Uuid), InterestVector>,
}

impl InMemoryInterestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl InterestStore for InMemoryInterestStore {
    async fn load(&self, user_id: Uuid, subject_id: Uuid) -> Result<Option<InterestVector>> {
        Ok(self
            .records
            .get(&(user_id, subject_id))
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, user_id: Uuid, subject_id: Uuid, vector: &InterestVector) -> Result<()> {
        self.records.insert((user_id, subject_id), vector.clone());
        Ok(())
    }
}

/// Redis-backed store
pub struct RedisInterestStore {
    redis: redis::Client,
    key_prefix: String,
    /// Record expiry; `None` keeps records forever
    ttl_secs: Option<u64>,
}

impl RedisInterestStore {
    pub fn new(redis: redis::Client) -> Self {
        Self {
            redis,
            key_prefix: "interest".to_string(),
            ttl_secs: None,
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = (ttl_secs > 0).then_some(ttl_secs);
        self
    }

    fn record_key(&self, user_id: Uuid, subject_id: Uuid) -> String {
        format!("{}:{}:{}", self.key_prefix, user_id, subject_id)
    }
}

#[async_trait]
impl InterestStore for RedisInterestStore {
    async fn load(&self, user_id: Uuid, subject_id: Uuid) -> Result<Option<InterestVector>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let key = self.record_key(user_id, subject_id);

        let json: Option<String> = conn.get(&key).await?;

        match json {
            Some(data) => serde_json::from_str(&data)
                .map(Some)
                .map_err(|e| InterestError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: Uuid, subject_id: Uuid, vector: &InterestVector) -> Result<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let key = self.record_key(user_id, subject_id);

        let json = serde_json::to_string(vector)
            .map_err(|e| InterestError::Serialization(e.to_string()))?;

        match self.ttl_secs {
            Some(ttl) => {
                let _: () = conn.set_ex(&key, &json, ttl).await?;
            }
            None => {
                let _: () = conn.set(&key, &json).await?;
            }
        }

        debug!(key = %key, "Interest vector saved");
        Ok(())
    }
}
