// ============================================
// Interest Vector (兴趣向量)
// ============================================
//
// Per-(user, subject) topic affinity with forgetting:
//
//   on interaction:   every score *= DECAY_FACTOR
//                     score[topic] = min(score[topic] + weight * INTERACTION_BOOST, 1.0)
//   on pinning:       score[topic] = min(score[topic] + EXPLICIT_BOOST, 1.0)
//
// Decay runs before the boost so the reinforced topic is not decayed
// by the same update.

use crate::utils::clamp_unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Multiplier applied to every score on each interaction
pub const DECAY_FACTOR: f64 = 0.95;
/// Score gained per unit of interaction weight
pub const INTERACTION_BOOST: f64 = 0.1;
/// One-time boost when a topic is pinned
pub const EXPLICIT_BOOST: f64 = 0.3;
/// Score assumed for a topic the vector has never seen
pub const DEFAULT_TOPIC_SCORE: f64 = 0.5;
pub const MAX_RECENT_TOPICS: usize = 10;

const BASELINE: [(&str, f64); 7] = [
    ("sleep", 0.7),
    ("food", 0.7),
    ("health", 0.8),
    ("development", 0.6),
    ("social", 0.5),
    ("activity", 0.5),
    ("mood", 0.6),
];

/// Canonical key for a topic name
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestVector {
    /// topic -> affinity in [0, 1]
    #[serde(default)]
    pub scores: HashMap<String, f64>,
    /// Topics the user pinned
    #[serde(default)]
    pub explicit_topics: Vec<String>,
    /// Most recent first, at most MAX_RECENT_TOPICS, no duplicates
    #[serde(default)]
    pub recent_topics: Vec<String>,
    #[serde(default)]
    pub last_interaction_at: Option<DateTime<Utc>>,
}

impl Default for InterestVector {
    fn default() -> Self {
        Self::baseline()
    }
}

impl InterestVector {
    /// Vector handed out before the first interaction
    pub fn baseline() -> Self {
        Self {
            scores: BASELINE
                .iter()
                .map(|(topic, score)| (topic.to_string(), *score))
                .collect(),
            explicit_topics: Vec::new(),
            recent_topics: Vec::new(),
            last_interaction_at: None,
        }
    }

    pub fn score(&self, topic: &str) -> Option<f64> {
        self.scores.get(&normalize_topic(topic)).copied()
    }

    pub fn is_explicit(&self, topic: &str) -> bool {
        let key = normalize_topic(topic);
        self.explicit_topics.iter().any(|t| *t == key)
    }

    pub fn is_recent(&self, topic: &str) -> bool {
        let key = normalize_topic(topic);
        self.recent_topics.iter().any(|t| *t == key)
    }

    /// Fade every score by `factor`
    pub fn decay(&mut self, factor: f64) {
        for score in self.scores.values_mut() {
            *score = clamp_unit(*score * factor);
        }
    }

    /// Apply one interaction: decay all, boost `topic`, bump it to the
    /// front of the recent list.
    pub fn record_interaction(&mut self, topic: &str, weight: f64, at: DateTime<Utc>) {
        let key = normalize_topic(topic);

        self.decay(DECAY_FACTOR);

        let current = self.scores.get(&key).copied().unwrap_or(DEFAULT_TOPIC_SCORE);
        self.scores
            .insert(key.clone(), clamp_unit(current + weight * INTERACTION_BOOST));

        self.touch_recent(key);
        self.last_interaction_at = Some(at);
    }

    /// Replace the pinned set and give each pinned topic a one-time boost
    pub fn set_explicit_topics(&mut self, topics: &[String]) {
        let mut pinned: Vec<String> = Vec::with_capacity(topics.len());
        for topic in topics {
            let key = normalize_topic(topic);
            if key.is_empty() || pinned.contains(&key) {
                continue;
            }
            pinned.push(key);
        }

        for key in &pinned {
            let current = self.scores.get(key).copied().unwrap_or(DEFAULT_TOPIC_SCORE);
            self.scores
                .insert(key.clone(), clamp_unit(current + EXPLICIT_BOOST));
        }

        self.explicit_topics = pinned;
    }

    fn touch_recent(&mut self, key: String) {
        self.recent_topics.retain(|t| *t != key);
        self.recent_topics.insert(0, key);
        self.recent_topics.truncate(MAX_RECENT_TOPICS);
    }
}
