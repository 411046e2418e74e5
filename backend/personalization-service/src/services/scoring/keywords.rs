// Keyword heuristics shared by the scorers.
//
// All matching is case-insensitive substring containment, so "social" also
// matches "antisocial_behavior". Kept as-is; callers that need token
// matching should not reuse these.

use crate::utils::contains_ignore_case;

/// Event-type keywords and their base severity, checked in order
pub const EVENT_SEVERITY_KEYWORDS: [(&str, u8); 6] = [
    ("incident", 9),
    ("sickness", 8),
    ("illness", 8),
    ("medical", 7),
    ("injury", 8),
    ("allergy", 7),
];

/// Words in daycare notes that escalate report urgency
pub const CONCERN_KEYWORDS: [&str; 4] = ["urgent", "immediate", "concern", "worried"];

/// Reminder categories that carry a deadline with health consequences
pub const TIME_CRITICAL_CATEGORIES: [&str; 3] = ["appointment", "vaccination", "medication"];

/// Whether an event type string refers to `topic`
pub fn event_matches_topic(event_type: &str, topic: &str) -> bool {
    contains_ignore_case(event_type, topic)
}

/// Base severity of an event type; 0 when no keyword matches
pub fn event_base_severity(event_type: &str) -> u8 {
    EVENT_SEVERITY_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_ignore_case(event_type, keyword))
        .map(|(_, severity)| *severity)
        .unwrap_or(0)
}

pub fn notes_signal_concern(notes: &str) -> bool {
    CONCERN_KEYWORDS
        .iter()
        .any(|keyword| contains_ignore_case(notes, keyword))
}

pub fn is_time_critical_category(category: &str) -> bool {
    let category = category.trim();
    TIME_CRITICAL_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category))
}
