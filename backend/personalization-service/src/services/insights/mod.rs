// ============================================
// Insight Cards Module (洞察卡片)
// ============================================
//
// One card per fixed topic: scores from the scoring module, copy from
// templates, ordered by the ranker.

pub mod ranker;
pub mod templates;

pub use ranker::{
    data_points, resolve_trend, InsightRanker, DEFAULT_MIN_PRIORITY, DEFAULT_MIN_URGENCY,
};
