// Copy for insight cards. Everything here is a pure function of
// (topic, trend, subject name).

use crate::models::{ChartType, Topic, Trend};

/// Name used in card titles when the subject is unnamed
pub const DEFAULT_TITLE_NAME: &str = "Baby";

/// Name used in conversation prompts when the subject is unnamed
pub const DEFAULT_PROMPT_NAME: &str = "my baby";

pub fn title(topic: Topic, trend: Trend, name: &str) -> String {
    let declining = trend == Trend::Declining;

    match topic {
        Topic::Sleep if declining => format!("{}'s Sleep Pattern Needs Attention", name),
        Topic::Sleep => format!("{}'s Sleep Pattern", name),
        Topic::Food if declining => "Appetite Changes Detected".to_string(),
        Topic::Food => "Eating Habits Overview".to_string(),
        Topic::Health => "Health Status".to_string(),
        Topic::Development => "Development Progress".to_string(),
        Topic::Social => "Social Interactions".to_string(),
        Topic::Activity => "Activity Level".to_string(),
        Topic::Mood => "Mood Patterns".to_string(),
    }
}

pub fn summary(topic: Topic, trend: Trend) -> String {
    let phrase = match trend {
        Trend::Improving => "showing positive improvement",
        Trend::Declining => "showing concerning decline",
        Trend::Stable => "remaining stable",
    };

    format!(
        "{} patterns are {} over the past week.",
        topic.display_name(),
        phrase
    )
}

pub fn suggested_action(topic: Topic, trend: Trend) -> &'static str {
    match trend {
        Trend::Declining => match topic {
            Topic::Sleep => "Consider reviewing bedtime routine and sleep environment",
            Topic::Food => {
                "Monitor meal times and food preferences, consult pediatrician if persists"
            }
            Topic::Health => "Schedule a check-up with pediatrician",
            Topic::Mood => "Increase one-on-one time and observe for triggers",
            _ => "Monitor closely and consult with healthcare provider if concerned",
        },
        Trend::Improving => "Continue current approach and maintain consistency",
        Trend::Stable => "Keep monitoring and maintain current routine",
    }
}

pub fn chart_type(topic: Topic) -> ChartType {
    match topic {
        Topic::Mood | Topic::Health => ChartType::Bar,
        _ => ChartType::Line,
    }
}

/// Follow-up questions offered on the card
pub fn conversation_starters(topic: Topic, name: &str) -> Vec<String> {
    match topic {
        Topic::Sleep => vec![
            format!("What's a good bedtime routine for {}?", name),
            format!("How can I improve {}'s sleep quality?", name),
            format!("Is {} getting enough sleep?", name),
        ],
        Topic::Food => vec![
            format!("What are healthy meal options for {}?", name),
            "How can I encourage better eating habits?".to_string(),
            format!("Is {}'s diet balanced?", name),
        ],
        Topic::Development => vec![
            format!("What milestones should {} reach soon?", name),
            format!("How can I support {}'s development?", name),
            format!("Is {}'s development on track?", name),
        ],
        Topic::Social => vec![
            format!("How can I help {} make friends?", name),
            format!("What social activities are good for {}?", name),
        ],
        _ => vec![format!("Tell me more about {}'s {}", name, topic.as_str())],
    }
}
