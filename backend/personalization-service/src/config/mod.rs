use crate::services::insights::{DEFAULT_MIN_PRIORITY, DEFAULT_MIN_URGENCY};
use crate::services::scoring::{PriorityWeights, ScoringError};
use crate::services::starters::DEFAULT_MAX_STARTERS;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub service: ServiceConfig,
    pub redis: RedisConfig,
    pub scoring: PriorityWeights,
    pub ranking: RankingConfig,
}

/// Where interest vectors are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

/// SERVICE_* variables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub service_name: String,
    pub store_backend: StoreBackend,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "personalization-service".to_string(),
            store_backend: StoreBackend::Memory,
        }
    }
}

/// REDIS_* variables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    /// 0 keeps interest records forever
    pub interest_ttl_secs: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "interest".to_string(),
            interest_ttl_secs: 0,
        }
    }
}

/// RANKING_* variables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub insight_min_priority: u8,
    pub insight_min_urgency: u8,
    pub max_starters: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            insight_min_priority: DEFAULT_MIN_PRIORITY,
            insight_min_urgency: DEFAULT_MIN_URGENCY,
            max_starters: DEFAULT_MAX_STARTERS,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read each prefixed section.
    ///
    /// Priority weights come from PRIORITY_WEIGHT_* and must sum to 1.0.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            service: envy::prefixed("SERVICE_").from_env::<ServiceConfig>()?,
            redis: envy::prefixed("REDIS_").from_env::<RedisConfig>()?,
            scoring: envy::prefixed("PRIORITY_WEIGHT_").from_env::<PriorityWeights>()?,
            ranking: envy::prefixed("RANKING_").from_env::<RankingConfig>()?,
        };

        config.scoring.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.store_backend, StoreBackend::Memory);
        assert_eq!(config.ranking.insight_min_priority, 20);
        assert_eq!(config.ranking.insight_min_urgency, 3);
        assert_eq!(config.ranking.max_starters, 10);
        assert!(config.scoring.validate().is_ok());
    }

    #[test]
    fn test_sections_from_prefixed_vars() {
        let service: ServiceConfig = envy::prefixed("SERVICE_")
            .from_iter(vars(&[("SERVICE_STORE_BACKEND", "redis")]))
            .unwrap();
        assert_eq!(service.store_backend, StoreBackend::Redis);
        assert_eq!(service.service_name, "personalization-service");

        let redis: RedisConfig = envy::prefixed("REDIS_")
            .from_iter(vars(&[
                ("REDIS_URL", "redis://cache:6380"),
                ("REDIS_INTEREST_TTL_SECS", "86400"),
            ]))
            .unwrap();
        assert_eq!(redis.url, "redis://cache:6380");
        assert_eq!(redis.key_prefix, "interest");
        assert_eq!(redis.interest_ttl_secs, 86400);
    }

    #[test]
    fn test_partial_weights_fail_validation() {
        let weights: PriorityWeights = envy::prefixed("PRIORITY_WEIGHT_")
            .from_iter(vars(&[("PRIORITY_WEIGHT_INTEREST", "0.5")]))
            .unwrap();
        assert_eq!(weights.urgency, 0.25);
        assert!(weights.validate().is_err());

        let weights: PriorityWeights = envy::prefixed("PRIORITY_WEIGHT_")
            .from_iter(vars(&[
                ("PRIORITY_WEIGHT_INTEREST", "0.5"),
                ("PRIORITY_WEIGHT_URGENCY", "0.05"),
            ]))
            .unwrap();
        assert!(weights.validate().is_ok());
    }
}
