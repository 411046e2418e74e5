// ============================================
// Interest Tracking Module
// ============================================
//
// Learned per-(user, subject) interest profile:
// 1. Baseline vector handed out before any interaction
// 2. Time decay + reinforcement on every interaction
// 3. One-time boost for explicitly pinned topics
//
// The algorithm lives on InterestVector (pure); InterestTracker adds
// load -> mutate -> save through an injected InterestStore with one
// writer per key.

pub mod store;
pub mod tracker;
pub mod vector;

pub use store::{InMemoryInterestStore, InterestStore, RedisInterestStore};
pub use tracker::InterestTracker;
pub use vector::{normalize_topic, InterestVector, DEFAULT_TOPIC_SCORE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterestError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid topic: {0:?}")]
    InvalidTopic(String),
}

impl From<redis::RedisError> for InterestError {
    fn from(e: redis::RedisError) -> Self {
        InterestError::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InterestError>;
