use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

mod context;
mod output;

pub use context::{
    ContextSnapshot, DailyMetrics, DailySummary, DaycareReport, MetricTrend, RecentEvent, Reminder,
};
pub use output::{
    ChartType, ConversationStarter, DataPoint, Digest, InsightCard, PriorityLevel,
    StarterCandidate, StarterCategory, TopicScore, UrgencyLevel,
};

/// Fixed well-being categories used as the unit of scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Sleep,
    Food,
    Health,
    Development,
    Social,
    Activity,
    Mood,
}

impl Topic {
    /// Display order of the insight page
    pub const ALL: [Topic; 7] = [
        Topic::Sleep,
        Topic::Food,
        Topic::Health,
        Topic::Development,
        Topic::Social,
        Topic::Activity,
        Topic::Mood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Sleep => "sleep",
            Topic::Food => "food",
            Topic::Health => "health",
            Topic::Development => "development",
            Topic::Social => "social",
            Topic::Activity => "activity",
            Topic::Mood => "mood",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Sleep => "Sleep",
            Topic::Food => "Food",
            Topic::Health => "Health",
            Topic::Development => "Development",
            Topic::Social => "Social",
            Topic::Activity => "Activity",
            Topic::Mood => "Mood",
        }
    }

    /// Topics whose decline is escalated harder by the urgency scorer
    pub fn is_wellbeing_critical(&self) -> bool {
        matches!(self, Topic::Sleep | Topic::Food | Topic::Health)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for Topic {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sleep" => Ok(Topic::Sleep),
            "food" | "feeding" => Ok(Topic::Food),
            "health" | "medical" => Ok(Topic::Health),
            "development" | "milestone" => Ok(Topic::Development),
            "social" | "friend" => Ok(Topic::Social),
            "activity" => Ok(Topic::Activity),
            "mood" => Ok(Topic::Mood),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// Recent trajectory of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

impl FromStr for Trend {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "improving" => Ok(Trend::Improving),
            "stable" => Ok(Trend::Stable),
            "declining" => Ok(Trend::Declining),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Trend {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Priority label attached to incoming events and reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PriorityLabel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLabel {
    /// True for the labels counted as "high priority" signals
    pub fn is_elevated(&self) -> bool {
        matches!(self, PriorityLabel::High | PriorityLabel::Critical)
    }
}

impl FromStr for PriorityLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(PriorityLabel::Low),
            "medium" | "normal" => Ok(PriorityLabel::Medium),
            "high" => Ok(PriorityLabel::High),
            "critical" => Ok(PriorityLabel::Critical),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl TryFrom<String> for PriorityLabel {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Risk label assigned to an event by the upstream extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl FromStr for RiskLevel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl TryFrom<String> for RiskLevel {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Deserialize an optional label, mapping unrecognized values to `None`
/// so one odd upstream label does not reject the whole snapshot.
pub(crate) fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Deserialize the topic trend map, dropping entries whose key is not a
/// known topic or whose value is not a known trend. A canonical topic key
/// wins over an alias naming the same topic.
pub(crate) fn lenient_topic_trends<'de, D>(
    deserializer: D,
) -> Result<HashMap<Topic, Trend>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    let mut trends = HashMap::new();

    for (key, value) in raw.unwrap_or_default() {
        let Ok(topic) = key.parse::<Topic>() else {
            continue;
        };
        let Some(trend) = value.as_str().and_then(|v| v.parse::<Trend>().ok()) else {
            continue;
        };

        if key.trim().eq_ignore_ascii_case(topic.as_str()) {
            trends.insert(topic, trend);
        } else {
            trends.entry(topic).or_insert(trend);
        }
    }

    Ok(trends)
}
