// ============================================
// Conversation Starters Module (对话开场)
// ============================================
//
// Rule-based prompt suggestions:
// 1. Generators: age milestones, recent events, season, health, development
// 2. Ranker: label base score + category bonus, top N

pub mod generators;
pub mod ranker;

pub use generators::{StarterGenerator, DEFAULT_GENERATORS};
pub use ranker::{StarterRanker, DEFAULT_MAX_STARTERS};
