// ============================================
// Priority Scorer (优先级打分)
// ============================================
//
// priority = round(100 * Σ sub_score * weight), clamped to [0, 100]
//
// Sub-scores (each 0.0 - 1.0):
// - Interest: learned profile score + explicit/recent boosts
// - Urgency signal: daily/report incidents, notes, elevated events
// - Age relevance: per-topic age curve
// - Recency: days since the latest matching event
// - Trend: declining topics rank higher

use super::keywords::event_matches_topic;
use super::{AgeCurve, PriorityWeights, Result, UrgencySignal};
use crate::models::{ContextSnapshot, Topic, Trend};
use crate::services::interest::{normalize_topic, DEFAULT_TOPIC_SCORE};
use crate::utils::{clamp_unit, days_between, round_percent};
use serde::Serialize;
use tracing::debug;

const EXPLICIT_INTEREST_BOOST: f64 = 0.2;
const RECENT_INTEREST_BOOST: f64 = 0.1;

/// Recency when no event matches the topic
const NO_EVENT_RECENCY: f64 = 0.3;

/// Trend score when the topic's trend is unknown
const UNKNOWN_TREND_SCORE: f64 = 0.5;

/// The five sub-scores behind one priority value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriorityBreakdown {
    pub interest: f64,
    pub urgency: f64,
    pub age_relevance: f64,
    pub recency: f64,
    pub trend: f64,
}

impl PriorityBreakdown {
    /// Weighted 0-100 priority
    pub fn combine(&self, weights: &PriorityWeights) -> u8 {
        let weighted = self.interest * weights.interest
            + self.urgency * weights.urgency
            + self.age_relevance * weights.age_relevance
            + self.recency * weights.recency
            + self.trend * weights.trend;

        round_percent(weighted * 100.0)
    }
}

/// Priority scorer
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    weights: PriorityWeights,
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityScorer {
    /// Create scorer with default weights
    pub fn new() -> Self {
        Self {
            weights: PriorityWeights::default(),
        }
    }

    /// Create with custom weights; rejects weights that do not sum to 1.0
    pub fn with_weights(weights: PriorityWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    pub fn score(&self, topic: Topic, ctx: &ContextSnapshot) -> u8 {
        self.score_named(topic.as_str(), ctx)
    }

    /// Score an arbitrary topic name, e.g. a pinned "potty" interest
    pub fn score_named(&self, topic: &str, ctx: &ContextSnapshot) -> u8 {
        let breakdown = self.breakdown_named(topic, ctx);
        let priority = breakdown.combine(&self.weights);

        debug!(
            topic = %topic,
            interest = breakdown.interest,
            urgency = breakdown.urgency,
            age_relevance = breakdown.age_relevance,
            recency = breakdown.recency,
            trend = breakdown.trend,
            priority = priority,
            "Priority scored"
        );

        priority
    }

    pub fn breakdown(&self, topic: Topic, ctx: &ContextSnapshot) -> PriorityBreakdown {
        self.breakdown_named(topic.as_str(), ctx)
    }

    pub fn breakdown_named(&self, topic: &str, ctx: &ContextSnapshot) -> PriorityBreakdown {
        PriorityBreakdown {
            interest: interest_score(topic, ctx),
            urgency: UrgencySignal::from_context(ctx).value(),
            age_relevance: AgeCurve::for_topic_name(topic).relevance(ctx.age_months),
            recency: recency_score(topic, ctx),
            trend: trend_score(topic, ctx),
        }
    }
}

/// Profile score with boosts. Boosts apply even when the topic has no
/// stored score yet, on top of the 0.5 default.
fn interest_score(topic: &str, ctx: &ContextSnapshot) -> f64 {
    let Some(vector) = &ctx.interest else {
        return DEFAULT_TOPIC_SCORE;
    };

    let key = normalize_topic(topic);
    let mut score = vector.score(&key).unwrap_or(DEFAULT_TOPIC_SCORE);

    if vector.is_explicit(&key) {
        score += EXPLICIT_INTEREST_BOOST;
    }
    if vector.is_recent(&key) {
        score += RECENT_INTEREST_BOOST;
    }

    clamp_unit(score)
}

fn recency_score(topic: &str, ctx: &ContextSnapshot) -> f64 {
    // Future-dated events count as today
    let newest = ctx
        .recent_events
        .iter()
        .filter(|e| event_matches_topic(&e.event_type, topic))
        .filter_map(|e| e.occurred_at)
        .map(|occurred| days_between(occurred, ctx.date).max(0))
        .min();

    match newest {
        None => NO_EVENT_RECENCY,
        Some(0) => 1.0,
        Some(1) => 0.9,
        Some(2..=3) => 0.7,
        Some(4..=7) => 0.5,
        Some(8..=14) => 0.3,
        Some(_) => 0.1,
    }
}

fn trend_score(topic: &str, ctx: &ContextSnapshot) -> f64 {
    let trend = topic
        .parse::<Topic>()
        .ok()
        .and_then(|topic| ctx.trend_for(topic));

    match trend {
        Some(Trend::Declining) => 1.0,
        Some(Trend::Improving) => 0.6,
        Some(Trend::Stable) => 0.4,
        None => UNKNOWN_TREND_SCORE,
    }
}
