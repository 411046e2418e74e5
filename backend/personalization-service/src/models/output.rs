use super::{Topic, Trend};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display label derived from a numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    /// high >= 75, medium >= 50, low otherwise
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            PriorityLevel::High
        } else if score >= 50 {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Low => "low",
            PriorityLevel::Medium => "medium",
            PriorityLevel::High => "high",
        }
    }
}

/// Human-readable band of a 0-10 urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn from_urgency(urgency: u8) -> Self {
        if urgency >= 9 {
            UrgencyLevel::Critical
        } else if urgency >= 7 {
            UrgencyLevel::High
        } else if urgency >= 5 {
            UrgencyLevel::Medium
        } else if urgency >= 3 {
            UrgencyLevel::Low
        } else {
            UrgencyLevel::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::None => "none",
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Critical => "critical",
        }
    }
}

/// Result of scoring one topic for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopicScore {
    pub topic: Topic,
    /// 0-100
    pub priority: u8,
    /// 0-10
    pub urgency: u8,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub label: String,
}

/// Topic insight card shown on the insights page
#[derive(Debug, Clone, Serialize)]
pub struct InsightCard {
    pub insight_id: Uuid,
    pub category: Topic,
    pub title: String,
    pub summary: String,
    pub priority: PriorityLevel,
    pub priority_score: u8,
    pub urgency: u8,
    pub urgency_level: UrgencyLevel,
    pub trend: Trend,
    pub data_points: Vec<DataPoint>,
    pub chart_type: ChartType,
    pub actionable: bool,
    pub suggested_action: String,
    pub conversation_starters: Vec<String>,
    pub calculated_date: NaiveDate,
}

/// Source rule of a conversation starter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterCategory {
    AgeMilestone,
    RecentEvent,
    Seasonal,
    Health,
    Development,
}

impl StarterCategory {
    /// Score bonus added on top of the label base
    pub fn bonus(&self) -> u8 {
        match self {
            StarterCategory::RecentEvent => 20,
            StarterCategory::AgeMilestone => 15,
            StarterCategory::Health => 10,
            StarterCategory::Seasonal | StarterCategory::Development => 0,
        }
    }
}

/// Unscored starter emitted by a generator rule
#[derive(Debug, Clone, PartialEq)]
pub struct StarterCandidate {
    pub category: StarterCategory,
    pub title: String,
    pub prompt: String,
    /// Why the starter is suggested
    pub context: String,
    pub priority: PriorityLevel,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationStarter {
    pub category: StarterCategory,
    pub title: String,
    pub prompt: String,
    pub context: String,
    pub priority: PriorityLevel,
    pub priority_score: u8,
    pub icon: String,
}

/// Everything the digest view renders for one subject and day
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub user_id: Uuid,
    pub subject_id: Uuid,
    pub date: NaiveDate,
    pub insights: Vec<InsightCard>,
    pub starters: Vec<ConversationStarter>,
    /// Topics at urgency 8 or above
    pub immediate_attention: Vec<Topic>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_level_bands() {
        assert_eq!(PriorityLevel::from_score(100), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(75), PriorityLevel::High);
        assert_eq!(PriorityLevel::from_score(74), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_score(50), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::from_score(49), PriorityLevel::Low);
        assert_eq!(PriorityLevel::from_score(0), PriorityLevel::Low);
    }

    #[test]
    fn test_urgency_level_bands() {
        let cases = [
            (10, UrgencyLevel::Critical),
            (9, UrgencyLevel::Critical),
            (8, UrgencyLevel::High),
            (7, UrgencyLevel::High),
            (6, UrgencyLevel::Medium),
            (5, UrgencyLevel::Medium),
            (4, UrgencyLevel::Low),
            (3, UrgencyLevel::Low),
            (2, UrgencyLevel::None),
            (0, UrgencyLevel::None),
        ];

        for (urgency, expected) in cases {
            assert_eq!(UrgencyLevel::from_urgency(urgency), expected, "urgency {}", urgency);
        }
    }
}
