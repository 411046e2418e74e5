// ============================================
// Urgency Scorer (紧迫度打分)
// ============================================
//
// urgency = min(event + reminder + trend + report, 10)
//
// Each contribution is an integer rule:
// - Event: severest matching event, softened as it ages
// - Reminder: closest deadline, any topic
// - Trend: declining topics
// - Report: daycare incident or notes

use super::keywords::{
    event_base_severity, event_matches_topic, is_time_critical_category, notes_signal_concern,
};
use crate::models::{
    ContextSnapshot, PriorityLabel, RecentEvent, Reminder, RiskLevel, Topic, Trend,
};
use crate::utils::days_between;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

pub const MAX_URGENCY: u8 = 10;

/// Urgency at or above which a topic needs immediate action
pub const IMMEDIATE_ACTION_THRESHOLD: u8 = 8;

/// The four additive contributions behind one urgency value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UrgencyBreakdown {
    pub event: u8,
    pub reminder: u8,
    pub trend: u8,
    pub report: u8,
}

impl UrgencyBreakdown {
    pub fn total(&self) -> u8 {
        let sum = [self.event, self.reminder, self.trend, self.report]
            .iter()
            .map(|&part| part as u16)
            .sum::<u16>();
        sum.min(MAX_URGENCY as u16) as u8
    }
}

/// Urgency scorer
#[derive(Debug, Clone, Default)]
pub struct UrgencyScorer;

impl UrgencyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, topic: Topic, ctx: &ContextSnapshot) -> u8 {
        let breakdown = self.breakdown(topic, ctx);
        let urgency = breakdown.total();

        debug!(
            topic = %topic,
            event = breakdown.event,
            reminder = breakdown.reminder,
            trend = breakdown.trend,
            report = breakdown.report,
            urgency = urgency,
            "Urgency scored"
        );

        urgency
    }

    pub fn breakdown(&self, topic: Topic, ctx: &ContextSnapshot) -> UrgencyBreakdown {
        UrgencyBreakdown {
            event: event_urgency(topic.as_str(), ctx),
            reminder: reminder_urgency(ctx),
            trend: trend_urgency(topic, ctx),
            report: report_urgency(ctx),
        }
    }

    pub fn is_immediate_action_required(&self, topic: Topic, ctx: &ContextSnapshot) -> bool {
        self.score(topic, ctx) >= IMMEDIATE_ACTION_THRESHOLD
    }
}

fn event_urgency(topic: &str, ctx: &ContextSnapshot) -> u8 {
    ctx.recent_events
        .iter()
        .filter(|e| event_matches_topic(&e.event_type, topic))
        .map(|e| single_event_urgency(e, ctx.date))
        .max()
        .unwrap_or(0)
}

fn single_event_urgency(event: &RecentEvent, today: NaiveDate) -> u8 {
    let mut urgency = event_base_severity(&event.event_type);

    urgency += match event.priority {
        Some(PriorityLabel::Critical) => 2,
        Some(PriorityLabel::High) => 1,
        _ => 0,
    };

    if event.risk_level == Some(RiskLevel::High) {
        urgency += 1;
    }

    // Future-dated and undated events are not softened
    if let Some(occurred) = event.occurred_at {
        let days_since = days_between(occurred, today);
        if days_since > 3 {
            urgency = urgency.saturating_sub(2);
        } else if days_since > 1 {
            urgency = urgency.saturating_sub(1);
        }
    }

    urgency.min(MAX_URGENCY)
}

/// Not topic filtered: any pressing reminder raises every topic
fn reminder_urgency(ctx: &ContextSnapshot) -> u8 {
    ctx.reminders
        .iter()
        .filter_map(|r| single_reminder_urgency(r, ctx.date))
        .max()
        .unwrap_or(0)
        .min(MAX_URGENCY)
}

fn single_reminder_urgency(reminder: &Reminder, today: NaiveDate) -> Option<u8> {
    let due = reminder.due_date?;

    let mut urgency = match days_between(today, due) {
        d if d < 0 => 8,
        0 => 7,
        1 => 5,
        2..=3 => 3,
        4..=7 => 2,
        _ => 0,
    };

    if reminder.priority == Some(PriorityLabel::High) {
        urgency += 1;
    }
    if is_time_critical_category(&reminder.category) {
        urgency += 1;
    }

    Some(urgency)
}

fn trend_urgency(topic: Topic, ctx: &ContextSnapshot) -> u8 {
    match ctx.trend_for(topic) {
        Some(Trend::Declining) if topic.is_wellbeing_critical() => 6,
        Some(Trend::Declining) => 4,
        _ => 0,
    }
}

fn report_urgency(ctx: &ContextSnapshot) -> u8 {
    let Some(report) = &ctx.daycare_report else {
        return 0;
    };

    let mut urgency: u8 = if report.has_incident { 7 } else { 0 };

    if let Some(notes) = report.notes_text() {
        let from_notes = if notes_signal_concern(notes) { 6 } else { 3 };
        urgency = urgency.max(from_notes);
    }

    urgency
}
