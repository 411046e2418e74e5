// Starter rules. Each generator is a pure function of the snapshot and
// returns zero or more unscored candidates.

use crate::models::{ContextSnapshot, PriorityLevel, StarterCandidate, StarterCategory};
use chrono::Datelike;

/// Name used in prompts when the subject is unnamed
pub const DEFAULT_PROMPT_NAME: &str = "my baby";

pub type StarterGenerator = fn(&ContextSnapshot) -> Vec<StarterCandidate>;

/// All rules, in the order their candidates are emitted
pub const DEFAULT_GENERATORS: [StarterGenerator; 5] = [
    age_milestone_starters,
    recent_event_starters,
    seasonal_starters,
    health_starters,
    development_starters,
];

fn candidate(
    category: StarterCategory,
    title: &str,
    prompt: String,
    context: &str,
    priority: PriorityLevel,
    icon: &'static str,
) -> StarterCandidate {
    StarterCandidate {
        category,
        title: title.to_string(),
        prompt,
        context: context.to_string(),
        priority,
        icon,
    }
}

pub fn age_milestone_starters(ctx: &ContextSnapshot) -> Vec<StarterCandidate> {
    let Some(age) = ctx.age_months else {
        return Vec::new();
    };
    let name = ctx.subject_name_or(DEFAULT_PROMPT_NAME);
    let milestone = StarterCategory::AgeMilestone;

    let starter = match age {
        5..=7 => candidate(
            milestone,
            "Starting Solid Foods",
            format!("What foods should I introduce to {} at 6 months?", name),
            "Baby is at the age for introducing solid foods",
            PriorityLevel::High,
            "utensils",
        ),
        11..=13 => candidate(
            milestone,
            "First Steps",
            format!("How can I help {} learn to walk?", name),
            "Baby is approaching walking milestone",
            PriorityLevel::High,
            "baby",
        ),
        17..=19 => candidate(
            milestone,
            "Language Development",
            format!("What words should {} be saying by 18 months?", name),
            "Language development milestone period",
            PriorityLevel::Medium,
            "message-circle",
        ),
        23..=25 => candidate(
            milestone,
            "Potty Training",
            format!("When should I start potty training {}?", name),
            "Approaching potty training age",
            PriorityLevel::Medium,
            "droplet",
        ),
        35..=37 => candidate(
            milestone,
            "Preschool Readiness",
            format!("Is {} ready for preschool?", name),
            "Approaching preschool age",
            PriorityLevel::Medium,
            "school",
        ),
        _ => return Vec::new(),
    };

    vec![starter]
}

pub fn recent_event_starters(ctx: &ContextSnapshot) -> Vec<StarterCandidate> {
    let name = ctx.subject_name_or(DEFAULT_PROMPT_NAME);
    let mut starters = Vec::new();

    if ctx.has_daily_incident() {
        starters.push(candidate(
            StarterCategory::RecentEvent,
            "Recent Incident",
            format!("What should I do after {}'s recent incident?", name),
            "An incident was reported today",
            PriorityLevel::High,
            "alert-triangle",
        ));
    }

    if ctx.has_daily_sickness() {
        starters.push(candidate(
            StarterCategory::RecentEvent,
            "Health Concern",
            format!("How can I help {} feel better?", name),
            "Sickness reported recently",
            PriorityLevel::High,
            "thermometer",
        ));
    }

    if ctx.elevated_event_count() > 0 {
        starters.push(candidate(
            StarterCategory::RecentEvent,
            "Recent Concerns",
            format!("Should I be worried about {}'s recent behavior?", name),
            "Multiple high-priority events detected",
            PriorityLevel::Medium,
            "help-circle",
        ));
    }

    starters
}

pub fn seasonal_starters(ctx: &ContextSnapshot) -> Vec<StarterCandidate> {
    let name = ctx.subject_name_or(DEFAULT_PROMPT_NAME);

    let starter = match ctx.date.month() {
        12 | 1 | 2 => candidate(
            StarterCategory::Seasonal,
            "Winter Care",
            format!("How do I keep {} healthy during winter?", name),
            "Winter season care tips",
            PriorityLevel::Medium,
            "snowflake",
        ),
        6..=8 => candidate(
            StarterCategory::Seasonal,
            "Summer Safety",
            format!("What sun protection does {} need?", name),
            "Summer safety and sun protection",
            PriorityLevel::Medium,
            "sun",
        ),
        9 => candidate(
            StarterCategory::Seasonal,
            "Back to School",
            format!("How can I prepare {} for daycare/school?", name),
            "School season preparation",
            PriorityLevel::Medium,
            "backpack",
        ),
        _ => return Vec::new(),
    };

    vec![starter]
}

pub fn health_starters(ctx: &ContextSnapshot) -> Vec<StarterCandidate> {
    let Some(age) = ctx.age_months else {
        return Vec::new();
    };
    let name = ctx.subject_name_or(DEFAULT_PROMPT_NAME);
    let mut starters = Vec::new();

    if age % 6 == 0 || (11..=13).contains(&age) {
        starters.push(candidate(
            StarterCategory::Health,
            "Vaccination Schedule",
            format!("What vaccinations does {} need at this age?", name),
            "Vaccination milestone age",
            PriorityLevel::High,
            "shield",
        ));
    }

    starters.push(candidate(
        StarterCategory::Health,
        "Wellness Check",
        format!("What health milestones should {} reach?", name),
        "General health and wellness",
        PriorityLevel::Low,
        "heart",
    ));

    starters
}

pub fn development_starters(ctx: &ContextSnapshot) -> Vec<StarterCandidate> {
    let Some(age) = ctx.age_months else {
        return Vec::new();
    };
    let name = ctx.subject_name_or(DEFAULT_PROMPT_NAME);
    let mut starters = Vec::new();

    if age >= 12 {
        starters.push(candidate(
            StarterCategory::Development,
            "Learning Activities",
            format!("What activities can help {}'s development?", name),
            "Age-appropriate development activities",
            PriorityLevel::Medium,
            "brain",
        ));
    }

    if age >= 18 {
        starters.push(candidate(
            StarterCategory::Development,
            "Emotional Growth",
            format!("How can I support {}'s emotional development?", name),
            "Social-emotional development support",
            PriorityLevel::Medium,
            "smile",
        ));
    }

    starters
}
