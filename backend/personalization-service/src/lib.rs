pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use services::{
    DigestService, InMemoryInterestStore, InsightRanker, InterestStore, InterestTracker,
    PriorityScorer, RedisInterestStore, StarterRanker, UrgencyScorer,
};
