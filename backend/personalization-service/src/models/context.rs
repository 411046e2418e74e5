use super::{lenient_label, lenient_topic_trends, PriorityLabel, RiskLevel, Topic, Trend};
use crate::services::interest::InterestVector;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Immutable per-request input to every scorer and ranker.
///
/// Assembled by the context collaborator from the event, reminder, daycare
/// and interest sources. Missing sources arrive as `None` or empty lists and
/// each scorer falls back to its neutral default for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub user_id: Uuid,
    pub subject_id: Uuid,
    /// Day the digest is computed for
    pub date: NaiveDate,
    #[serde(default)]
    pub age_months: Option<u32>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub daily_summary: Option<DailySummary>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub daycare_report: Option<DaycareReport>,
    #[serde(default)]
    pub recent_events: Vec<RecentEvent>,
    #[serde(default)]
    pub interest: Option<InterestVector>,
    /// Unknown topics and trend values are dropped on input
    #[serde(default, deserialize_with = "lenient_topic_trends")]
    pub topic_trends: HashMap<Topic, Trend>,
    /// Last days of per-metric values, oldest first
    #[serde(default)]
    pub metric_history: Vec<DailyMetrics>,
}

impl ContextSnapshot {
    /// Empty snapshot: no age, no events, no reminders, no profile
    pub fn new(user_id: Uuid, subject_id: Uuid, date: NaiveDate) -> Self {
        Self {
            user_id,
            subject_id,
            date,
            age_months: None,
            subject_name: None,
            daily_summary: None,
            reminders: Vec::new(),
            daycare_report: None,
            recent_events: Vec::new(),
            interest: None,
            topic_trends: HashMap::new(),
            metric_history: Vec::new(),
        }
    }

    pub fn trend_for(&self, topic: Topic) -> Option<Trend> {
        self.topic_trends.get(&topic).copied()
    }

    pub fn has_daily_incident(&self) -> bool {
        self.daily_summary.as_ref().is_some_and(|s| s.has_incident)
    }

    pub fn has_daily_sickness(&self) -> bool {
        self.daily_summary.as_ref().is_some_and(|s| s.has_sickness)
    }

    /// Number of recent events labelled high or critical
    pub fn elevated_event_count(&self) -> usize {
        self.recent_events
            .iter()
            .filter(|e| e.priority.is_some_and(|p| p.is_elevated()))
            .count()
    }

    /// Name used in titles, falling back to `default` when unknown or blank
    pub fn subject_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.subject_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
    }
}

/// Daily activity rollup from the query side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySummary {
    #[serde(default)]
    pub total_events: u32,
    #[serde(default)]
    pub has_incident: bool,
    #[serde(default)]
    pub has_sickness: bool,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    #[serde(default)]
    pub recent_trends: Vec<MetricTrend>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub trend: Option<Trend>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Active caregiver reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    /// Free-form category, e.g. appointment, vaccination, prepare
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub priority: Option<PriorityLabel>,
    #[serde(default)]
    pub can_snooze: bool,
    #[serde(default)]
    pub can_complete: bool,
}

/// Third-party (daycare) report for the day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaycareReport {
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_incident: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub incident_description: Option<String>,
    #[serde(default)]
    pub meals: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub naps: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl DaycareReport {
    /// Daycare staff notes, if non-empty. Whitespace-only notes still count.
    pub fn notes_text(&self) -> Option<&str> {
        self.notes.as_deref().filter(|notes| !notes.is_empty())
    }
}

/// Discrete event from the event pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentEvent {
    #[serde(default)]
    pub id: Option<i64>,
    /// Free-form type string, e.g. "sleep_regression", "health_incident"
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub priority: Option<PriorityLabel>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub occurred_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}
