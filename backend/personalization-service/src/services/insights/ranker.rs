// ============================================
// Insight Ranker (洞察排序)
// ============================================
//
// Scores every fixed topic, drops cards that are both low priority and
// low urgency, and orders the rest by (priority desc, urgency desc).

use super::templates;
use crate::models::{
    ContextSnapshot, DataPoint, InsightCard, PriorityLevel, Topic, TopicScore, Trend, UrgencyLevel,
};
use crate::services::scoring::{PriorityScorer, UrgencyScorer};
use crate::utils::contains_ignore_case;
use tracing::info;
use uuid::Uuid;

/// Cards below this priority are dropped unless urgent
pub const DEFAULT_MIN_PRIORITY: u8 = 20;

/// Cards below this urgency are dropped unless high priority
pub const DEFAULT_MIN_URGENCY: u8 = 3;

/// Urgency at which a card is actionable regardless of trend
const ACTIONABLE_URGENCY: u8 = 6;

pub struct InsightRanker {
    priority_scorer: PriorityScorer,
    urgency_scorer: UrgencyScorer,
    min_priority: u8,
    min_urgency: u8,
}

impl Default for InsightRanker {
    fn default() -> Self {
        Self::new(PriorityScorer::new())
    }
}

impl InsightRanker {
    pub fn new(priority_scorer: PriorityScorer) -> Self {
        Self {
            priority_scorer,
            urgency_scorer: UrgencyScorer::new(),
            min_priority: DEFAULT_MIN_PRIORITY,
            min_urgency: DEFAULT_MIN_URGENCY,
        }
    }

    /// Set the keep thresholds; a card survives if it meets either one
    pub fn with_thresholds(mut self, min_priority: u8, min_urgency: u8) -> Self {
        self.min_priority = min_priority;
        self.min_urgency = min_urgency;
        self
    }

    /// Ranked insight cards for the snapshot
    pub fn rank(&self, ctx: &ContextSnapshot) -> Vec<InsightCard> {
        let mut cards: Vec<InsightCard> = Topic::ALL
            .iter()
            .map(|&topic| self.score_topic(topic, ctx))
            .filter(|score| self.is_kept(score))
            .map(|score| self.build_card(score, ctx))
            .collect();

        // Stable: equal keys keep the display order of Topic::ALL
        cards.sort_by(|a, b| {
            b.priority_score
                .cmp(&a.priority_score)
                .then_with(|| b.urgency.cmp(&a.urgency))
        });

        info!(
            subject_id = %ctx.subject_id,
            input_count = Topic::ALL.len(),
            output_count = cards.len(),
            "Insight ranking completed"
        );

        cards
    }

    pub fn score_topic(&self, topic: Topic, ctx: &ContextSnapshot) -> TopicScore {
        TopicScore {
            topic,
            priority: self.priority_scorer.score(topic, ctx),
            urgency: self.urgency_scorer.score(topic, ctx),
            trend: resolve_trend(topic, ctx),
        }
    }

    fn is_kept(&self, score: &TopicScore) -> bool {
        score.priority >= self.min_priority || score.urgency >= self.min_urgency
    }

    fn build_card(&self, score: TopicScore, ctx: &ContextSnapshot) -> InsightCard {
        let TopicScore {
            topic,
            priority,
            urgency,
            trend,
        } = score;

        InsightCard {
            insight_id: Uuid::new_v4(),
            category: topic,
            title: templates::title(
                topic,
                trend,
                ctx.subject_name_or(templates::DEFAULT_TITLE_NAME),
            ),
            summary: templates::summary(topic, trend),
            priority: PriorityLevel::from_score(priority),
            priority_score: priority,
            urgency,
            urgency_level: UrgencyLevel::from_urgency(urgency),
            trend,
            data_points: data_points(topic, ctx),
            chart_type: templates::chart_type(topic),
            actionable: trend == Trend::Declining || urgency >= ACTIONABLE_URGENCY,
            suggested_action: templates::suggested_action(topic, trend).to_string(),
            conversation_starters: templates::conversation_starters(
                topic,
                ctx.subject_name_or(templates::DEFAULT_PROMPT_NAME),
            ),
            calculated_date: ctx.date,
        }
    }
}

/// Display trend: explicit topic trend, then the first daily metric trend
/// naming the topic, then Stable
pub fn resolve_trend(topic: Topic, ctx: &ContextSnapshot) -> Trend {
    if let Some(trend) = ctx.trend_for(topic) {
        return trend;
    }

    ctx.daily_summary
        .as_ref()
        .and_then(|summary| {
            summary
                .recent_trends
                .iter()
                .filter(|t| contains_ignore_case(&t.metric, topic.as_str()))
                .find_map(|t| t.trend)
        })
        .unwrap_or(Trend::Stable)
}

/// One point per history day that has a metric naming the topic. When
/// several keys match, the alphabetically first one is used.
pub fn data_points(topic: Topic, ctx: &ContextSnapshot) -> Vec<DataPoint> {
    ctx.metric_history
        .iter()
        .filter_map(|day| {
            day.metrics
                .iter()
                .filter(|(key, value)| {
                    contains_ignore_case(key, topic.as_str()) && value.is_finite()
                })
                .min_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, value)| DataPoint {
                    date: day.date,
                    value: *value,
                    label: topic.as_str().to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyMetrics, DailySummary, MetricTrend, Reminder};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn snapshot() -> ContextSnapshot {
        ContextSnapshot::new(Uuid::new_v4(), Uuid::new_v4(), today())
    }

    #[test]
    fn test_low_priority_low_urgency_card_dropped() {
        let ranker = InsightRanker::default();
        let dropped = TopicScore {
            topic: Topic::Mood,
            priority: 15,
            urgency: 1,
            trend: Trend::Stable,
        };
        assert!(!ranker.is_kept(&dropped));

        assert!(ranker.is_kept(&TopicScore {
            priority: 20,
            ..dropped
        }));
        assert!(ranker.is_kept(&TopicScore {
            urgency: 3,
            ..dropped
        }));
    }

    #[test]
    fn test_thresholds_filter_empty_context() {
        // Empty snapshot scores every topic in the 30s with no urgency
        let strict = InsightRanker::default().with_thresholds(90, 3);
        assert!(strict.rank(&snapshot()).is_empty());

        let cards = InsightRanker::default().rank(&snapshot());
        assert_eq!(cards.len(), Topic::ALL.len());
    }

    #[test]
    fn test_cards_sorted_by_priority_then_urgency() {
        let ranker = InsightRanker::default();
        let mut ctx = snapshot();
        ctx.age_months = Some(14);
        ctx.topic_trends.insert(Topic::Sleep, Trend::Declining);
        ctx.topic_trends.insert(Topic::Social, Trend::Declining);
        ctx.daily_summary = Some(DailySummary {
            has_sickness: true,
            ..DailySummary::default()
        });

        let cards = ranker.rank(&ctx);
        assert!(!cards.is_empty());

        for pair in cards.windows(2) {
            assert!(pair[0].priority_score >= pair[1].priority_score);
            if pair[0].priority_score == pair[1].priority_score {
                assert!(pair[0].urgency >= pair[1].urgency);
            }
        }
        assert_eq!(cards[0].category, Topic::Sleep);
    }

    #[test]
    fn test_card_content() {
        let ranker = InsightRanker::default();
        let mut ctx = snapshot();
        ctx.subject_name = Some("Mia".to_string());
        ctx.topic_trends.insert(Topic::Sleep, Trend::Declining);

        let cards = ranker.rank(&ctx);
        let sleep = cards
            .iter()
            .find(|c| c.category == Topic::Sleep)
            .unwrap();

        assert_eq!(sleep.title, "Mia's Sleep Pattern Needs Attention");
        assert_eq!(sleep.trend, Trend::Declining);
        assert_eq!(sleep.urgency, 6);
        assert_eq!(sleep.urgency_level, UrgencyLevel::Medium);
        assert!(sleep.actionable);
        assert_eq!(
            sleep.conversation_starters[0],
            "What's a good bedtime routine for Mia?"
        );
        assert_eq!(sleep.calculated_date, today());

        let mood = cards.iter().find(|c| c.category == Topic::Mood).unwrap();
        assert!(!mood.actionable);
        assert_eq!(mood.trend, Trend::Stable);
    }

    #[test]
    fn test_pressing_reminder_makes_cards_actionable() {
        let ranker = InsightRanker::default();
        let mut ctx = snapshot();
        ctx.reminders = vec![Reminder {
            id: None,
            title: "Shots".to_string(),
            category: "vaccination".to_string(),
            due_date: Some(today()),
            priority: None,
            can_snooze: false,
            can_complete: true,
        }];

        let cards = ranker.rank(&ctx);
        assert!(cards.iter().all(|c| c.urgency == 8 && c.actionable));
    }

    #[test]
    fn test_resolve_trend_fallbacks() {
        let mut ctx = snapshot();
        assert_eq!(resolve_trend(Topic::Food, &ctx), Trend::Stable);

        ctx.daily_summary = Some(DailySummary {
            recent_trends: vec![MetricTrend {
                metric: "Food_Intake".to_string(),
                trend: Some(Trend::Improving),
                change_percent: Some(12.0),
                description: None,
            }],
            ..DailySummary::default()
        });
        assert_eq!(resolve_trend(Topic::Food, &ctx), Trend::Improving);

        ctx.topic_trends.insert(Topic::Food, Trend::Declining);
        assert_eq!(resolve_trend(Topic::Food, &ctx), Trend::Declining);
    }

    #[test]
    fn test_data_points_from_history() {
        let mut ctx = snapshot();
        ctx.metric_history = (0..3)
            .map(|i| {
                let mut metrics = HashMap::new();
                metrics.insert("sleep_hours".to_string(), 10.0 + i as f64);
                metrics.insert("sleep_wakeups".to_string(), 2.0);
                if i != 1 {
                    metrics.insert("mood_score".to_string(), 4.0);
                }
                DailyMetrics {
                    date: today() - chrono::Duration::days(3 - i),
                    metrics,
                }
            })
            .collect();

        let sleep = data_points(Topic::Sleep, &ctx);
        assert_eq!(sleep.len(), 3);
        assert_eq!(sleep[0].value, 10.0);
        assert_eq!(sleep[2].value, 12.0);
        assert!(sleep.iter().all(|p| p.label == "sleep"));

        assert_eq!(data_points(Topic::Mood, &ctx).len(), 2);
        assert!(data_points(Topic::Food, &ctx).is_empty());
    }
}
