use super::{normalize_topic, InterestError, InterestStore, InterestVector, Result};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

type RecordKey = (Uuid, Uuid);

/// Interest Tracker - 兴趣追踪
///
/// Owns the read-modify-write cycle of interest vectors. Updates for the same
/// (user, subject) pair are serialized behind a per-key mutex so interleaved
/// decay/boost cannot lose writes; different pairs run in parallel.
pub struct InterestTracker {
    store: Arc<dyn InterestStore>,
    locks: DashMap<RecordKey, Arc<Mutex<()>>>,
}

impl InterestTracker {
    pub fn new(store: Arc<dyn InterestStore>) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    /// Stored vector for the pair, or the baseline vector.
    ///
    /// Never fails: a store error degrades to the baseline and is logged.
    pub async fn get_vector(&self, user_id: Uuid, subject_id: Uuid) -> InterestVector {
        match self.store.load(user_id, subject_id).await {
            Ok(Some(vector)) => vector,
            Ok(None) => InterestVector::baseline(),
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    subject_id = %subject_id,
                    error = %e,
                    "Failed to load interest vector, using baseline"
                );
                InterestVector::baseline()
            }
        }
    }

    /// Decay the whole vector, reinforce `topic` by `weight`, and persist.
    pub async fn record_interaction(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic: &str,
        weight: f64,
    ) -> Result<InterestVector> {
        let key = normalize_topic(topic);
        if key.is_empty() {
            return Err(InterestError::InvalidTopic(topic.to_string()));
        }

        let weight = if weight.is_finite() {
            weight
        } else {
            warn!(topic = %key, weight = weight, "Non-finite interaction weight, ignoring boost");
            0.0
        };

        let vector = self
            .update(user_id, subject_id, |vector| {
                vector.record_interaction(&key, weight, Utc::now())
            })
            .await?;

        debug!(
            user_id = %user_id,
            subject_id = %subject_id,
            topic = %key,
            weight = weight,
            score = ?vector.score(&key),
            "Interest interaction recorded"
        );

        Ok(vector)
    }

    /// Replace the pinned topic set, boosting each pinned topic once.
    pub async fn set_explicit_topics(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topics: &[String],
    ) -> Result<InterestVector> {
        let vector = self
            .update(user_id, subject_id, |vector| vector.set_explicit_topics(topics))
            .await?;

        debug!(
            user_id = %user_id,
            subject_id = %subject_id,
            topics = ?vector.explicit_topics,
            "Explicit topics updated"
        );

        Ok(vector)
    }

    /// Load, mutate and save one record while holding its key lock
    async fn update<F>(&self, user_id: Uuid, subject_id: Uuid, mutate: F) -> Result<InterestVector>
    where
        F: FnOnce(&mut InterestVector),
    {
        let key = (user_id, subject_id);
        let lock = self.key_lock(key);

        let result = {
            let _guard = lock.lock().await;
            match self.store.load(user_id, subject_id).await {
                Ok(loaded) => {
                    let mut vector = loaded.unwrap_or_else(InterestVector::baseline);
                    mutate(&mut vector);
                    self.store
                        .save(user_id, subject_id, &vector)
                        .await
                        .map(|()| vector)
                }
                Err(e) => Err(e),
            }
        };

        drop(lock);
        self.release_lock(key);
        result
    }

    fn key_lock(&self, key: RecordKey) -> Arc<Mutex<()>> {
        self.locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Drop the key's lock once no other caller holds or waits on it.
    /// Runs under the shard lock, so no new clone can appear meanwhile.
    fn release_lock(&self, key: RecordKey) {
        self.locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::interest::store::MockInterestStore;
    use crate::services::interest::InMemoryInterestStore;

    fn tracker() -> InterestTracker {
        InterestTracker::new(Arc::new(InMemoryInterestStore::new()))
    }

    #[tokio::test]
    async fn test_get_vector_defaults_to_baseline() {
        let tracker = tracker();
        let vector = tracker.get_vector(Uuid::new_v4(), Uuid::new_v4()).await;

        assert_eq!(vector, InterestVector::baseline());
        assert!(vector.explicit_topics.is_empty());
        assert!(vector.recent_topics.is_empty());
    }

    #[tokio::test]
    async fn test_record_interaction_persists() {
        let tracker = tracker();
        let (user_id, subject_id) = (Uuid::new_v4(), Uuid::new_v4());

        tracker
            .record_interaction(user_id, subject_id, "Sleep", 1.0)
            .await
            .unwrap();

        let stored = tracker.get_vector(user_id, subject_id).await;
        assert!((stored.score("sleep").unwrap() - 0.765).abs() < 1e-9);
        assert!((stored.score("food").unwrap() - 0.665).abs() < 1e-9);
        assert_eq!(stored.recent_topics, vec!["sleep".to_string()]);
    }

    #[tokio::test]
    async fn test_key_locks_released_after_updates() {
        let tracker = tracker();

        for _ in 0..5 {
            let (user_id, subject_id) = (Uuid::new_v4(), Uuid::new_v4());
            tracker
                .record_interaction(user_id, subject_id, "sleep", 1.0)
                .await
                .unwrap();
            tracker
                .set_explicit_topics(user_id, subject_id, &["potty".to_string()])
                .await
                .unwrap();
        }

        assert!(tracker.locks.is_empty());
    }

    #[tokio::test]
    async fn test_blank_topic_rejected() {
        let tracker = tracker();
        let result = tracker
            .record_interaction(Uuid::new_v4(), Uuid::new_v4(), "   ", 1.0)
            .await;

        assert!(matches!(result, Err(InterestError::InvalidTopic(_))));
    }

    #[tokio::test]
    async fn test_nan_weight_only_decays() {
        let tracker = tracker();
        let vector = tracker
            .record_interaction(Uuid::new_v4(), Uuid::new_v4(), "mood", f64::NAN)
            .await
            .unwrap();

        assert!((vector.score("mood").unwrap() - 0.6 * 0.95).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_get_vector_degrades_on_store_error() {
        let mut store = MockInterestStore::new();
        store
            .expect_load()
            .returning(|_, _| Err(InterestError::Storage("connection refused".to_string())));

        let tracker = InterestTracker::new(Arc::new(store));
        let vector = tracker.get_vector(Uuid::new_v4(), Uuid::new_v4()).await;

        assert_eq!(vector, InterestVector::baseline());
    }

    #[tokio::test]
    async fn test_record_interaction_does_not_overwrite_on_load_error() {
        let mut store = MockInterestStore::new();
        store
            .expect_load()
            .returning(|_, _| Err(InterestError::Storage("timeout".to_string())));
        store.expect_save().never();

        let tracker = InterestTracker::new(Arc::new(store));
        let result = tracker
            .record_interaction(Uuid::new_v4(), Uuid::new_v4(), "sleep", 1.0)
            .await;

        assert!(matches!(result, Err(InterestError::Storage(_))));
        assert!(tracker.locks.is_empty());
    }

    #[tokio::test]
    async fn test_save_error_is_propagated() {
        let mut store = MockInterestStore::new();
        store.expect_load().returning(|_, _| Ok(None));
        store
            .expect_save()
            .times(1)
            .returning(|_, _, _| Err(InterestError::Storage("read only replica".to_string())));

        let tracker = InterestTracker::new(Arc::new(store));
        let result = tracker
            .set_explicit_topics(Uuid::new_v4(), Uuid::new_v4(), &["sleep".to_string()])
            .await;

        assert!(result.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_interactions_are_serialized() {
        let tracker = Arc::new(tracker());
        let (user_id, subject_id) = (Uuid::new_v4(), Uuid::new_v4());
        let calls = 40;

        let handles: Vec<_> = (0..calls)
            .map(|_| {
                let tracker = tracker.clone();
                tokio::spawn(async move {
                    tracker
                        .record_interaction(user_id, subject_id, "food", 0.2)
                        .await
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let mut expected_food = 0.7_f64;
        let mut expected_sleep = 0.7_f64;
        for _ in 0..calls {
            expected_food = (expected_food * 0.95 + 0.02).min(1.0);
            expected_sleep *= 0.95;
        }

        let vector = tracker.get_vector(user_id, subject_id).await;
        assert!(tracker.locks.is_empty());
        assert!((vector.score("food").unwrap() - expected_food).abs() < 1e-9);
        assert!((vector.score("sleep").unwrap() - expected_sleep).abs() < 1e-9);
        assert_eq!(vector.recent_topics, vec!["food".to_string()]);
    }
}
