// ============================================
// Topic Scoring Module (主题打分)
// ============================================
//
// Two independent scorers run per (topic, snapshot):
// - PriorityScorer: weighted blend of five sub-scores -> 0-100
// - UrgencyScorer: additive rule contributions -> 0-10
//
// Both are pure functions of the snapshot; no I/O, no Result.

pub mod age_relevance;
pub mod keywords;
pub mod priority;
pub mod urgency;

pub use age_relevance::AgeCurve;
pub use priority::{PriorityBreakdown, PriorityScorer};
pub use urgency::{UrgencyBreakdown, UrgencyScorer, IMMEDIATE_ACTION_THRESHOLD};

use crate::models::ContextSnapshot;
use crate::utils::clamp_unit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed drift of the weight sum from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("Invalid priority weights: {0}")]
    InvalidWeights(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

/// Configurable weights for priority scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Weight for the learned interest profile
    pub interest: f64,
    /// Weight for the continuous urgency signal
    pub urgency: f64,
    /// Weight for age relevance
    pub age_relevance: f64,
    /// Weight for recency of matching events
    pub recency: f64,
    /// Weight for the topic trend
    pub trend: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            interest: 0.30,
            urgency: 0.25,
            age_relevance: 0.20,
            recency: 0.15,
            trend: 0.10,
        }
    }
}

impl PriorityWeights {
    pub fn sum(&self) -> f64 {
        self.interest + self.urgency + self.age_relevance + self.recency + self.trend
    }

    /// Every weight is finite and non-negative and they sum to 1.0
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("interest", self.interest),
            ("urgency", self.urgency),
            ("age_relevance", self.age_relevance),
            ("recency", self.recency),
            ("trend", self.trend),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::InvalidWeights(format!(
                "weights must sum to 1.0, got {:.6}",
                sum
            )));
        }

        Ok(())
    }
}

/// Continuous 0-1 "something needs attention" signal used inside priority
/// scoring. Distinct from the discrete 0-10 urgency of [`UrgencyScorer`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct UrgencySignal(f64);

impl UrgencySignal {
    const DAILY_INCIDENT: f64 = 0.5;
    const DAILY_SICKNESS: f64 = 0.5;
    const REPORT_INCIDENT: f64 = 0.4;
    const REPORT_NOTES: f64 = 0.2;
    const PER_ELEVATED_EVENT: f64 = 0.15;
    const ELEVATED_EVENT_CAP: f64 = 0.6;

    pub fn new(value: f64) -> Self {
        Self(clamp_unit(value))
    }

    /// Aggregate signal over the whole snapshot (not topic filtered)
    pub fn from_context(ctx: &ContextSnapshot) -> Self {
        let mut signal = 0.0;

        if ctx.has_daily_incident() {
            signal += Self::DAILY_INCIDENT;
        }
        if ctx.has_daily_sickness() {
            signal += Self::DAILY_SICKNESS;
        }

        if let Some(report) = &ctx.daycare_report {
            if report.has_incident {
                signal += Self::REPORT_INCIDENT;
            }
            if report.notes_text().is_some() {
                signal += Self::REPORT_NOTES;
            }
        }

        let elevated = ctx.elevated_event_count() as f64;
        signal += (elevated * Self::PER_ELEVATED_EVENT).min(Self::ELEVATED_EVENT_CAP);

        Self::new(signal)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailySummary, DaycareReport, PriorityLabel, RecentEvent};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn snapshot() -> ContextSnapshot {
        ContextSnapshot::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )
    }

    fn elevated_event(priority: PriorityLabel) -> RecentEvent {
        RecentEvent {
            id: None,
            event_type: "note".to_string(),
            priority: Some(priority),
            risk_level: None,
            occurred_at: None,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = PriorityWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-12);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let skewed = PriorityWeights {
            interest: 0.5,
            ..PriorityWeights::default()
        };
        assert!(matches!(
            skewed.validate(),
            Err(ScoringError::InvalidWeights(_))
        ));

        let negative = PriorityWeights {
            interest: 0.6,
            urgency: -0.05,
            ..PriorityWeights::default()
        };
        assert!(negative.validate().is_err());

        let nan = PriorityWeights {
            trend: f64::NAN,
            ..PriorityWeights::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_urgency_signal_empty_context() {
        assert_eq!(UrgencySignal::from_context(&snapshot()).value(), 0.0);
    }

    #[test]
    fn test_urgency_signal_saturates() {
        let mut ctx = snapshot();
        ctx.daily_summary = Some(DailySummary {
            has_incident: true,
            has_sickness: true,
            ..DailySummary::default()
        });
        ctx.daycare_report = Some(DaycareReport {
            has_incident: true,
            ..DaycareReport::default()
        });

        assert_eq!(UrgencySignal::from_context(&ctx).value(), 1.0);
    }

    #[test]
    fn test_elevated_events_are_capped() {
        let mut ctx = snapshot();
        ctx.recent_events = (0..10)
            .map(|_| elevated_event(PriorityLabel::Critical))
            .collect();
        ctx.recent_events.push(elevated_event(PriorityLabel::Low));

        assert!((UrgencySignal::from_context(&ctx).value() - 0.6).abs() < 1e-12);

        ctx.recent_events.truncate(2);
        assert!((UrgencySignal::from_context(&ctx).value() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_report_notes_signal() {
        let mut ctx = snapshot();
        ctx.daycare_report = Some(DaycareReport {
            notes: Some(String::new()),
            ..DaycareReport::default()
        });
        assert_eq!(UrgencySignal::from_context(&ctx).value(), 0.0);

        // Whitespace-only notes are still notes
        ctx.daycare_report = Some(DaycareReport {
            notes: Some("   ".to_string()),
            ..DaycareReport::default()
        });
        assert!((UrgencySignal::from_context(&ctx).value() - 0.2).abs() < 1e-12);

        ctx.daycare_report = Some(DaycareReport {
            notes: Some("Napped well".to_string()),
            ..DaycareReport::default()
        });
        assert!((UrgencySignal::from_context(&ctx).value() - 0.2).abs() < 1e-12);
    }
}
