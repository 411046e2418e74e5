pub mod digest;
pub mod insights;
pub mod interest;
pub mod scoring;
pub mod starters;

pub use digest::DigestService;
pub use insights::InsightRanker;
pub use interest::{
    InMemoryInterestStore, InterestError, InterestStore, InterestTracker, InterestVector,
    RedisInterestStore,
};
pub use scoring::{PriorityScorer, PriorityWeights, ScoringError, UrgencyScorer, UrgencySignal};
pub use starters::StarterRanker;
