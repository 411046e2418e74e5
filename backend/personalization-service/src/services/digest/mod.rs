// ============================================
// Digest Service (每日摘要)
// ============================================
//
// Entry point used by the binary and callers:
// snapshot -> interest fill-in -> insight cards + starters -> Digest
//
// Also fronts the interest tracker so callers hold one handle.

use crate::config::Config;
use crate::models::{ContextSnapshot, Digest, Topic};
use crate::services::insights::InsightRanker;
use crate::services::interest::{InterestStore, InterestTracker, InterestVector};
use crate::services::scoring::{PriorityScorer, ScoringError, IMMEDIATE_ACTION_THRESHOLD};
use crate::services::starters::StarterRanker;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct DigestService {
    tracker: Arc<InterestTracker>,
    insights: InsightRanker,
    starters: StarterRanker,
}

impl DigestService {
    pub fn new(
        tracker: Arc<InterestTracker>,
        insights: InsightRanker,
        starters: StarterRanker,
    ) -> Self {
        Self {
            tracker,
            insights,
            starters,
        }
    }

    /// Build from configuration; fails only on invalid priority weights
    pub fn from_config(
        config: &Config,
        store: Arc<dyn InterestStore>,
    ) -> Result<Self, ScoringError> {
        let scorer = PriorityScorer::with_weights(config.scoring)?;
        let insights = InsightRanker::new(scorer).with_thresholds(
            config.ranking.insight_min_priority,
            config.ranking.insight_min_urgency,
        );
        let starters = StarterRanker::new(config.ranking.max_starters);

        Ok(Self::new(
            Arc::new(InterestTracker::new(store)),
            insights,
            starters,
        ))
    }

    pub fn tracker(&self) -> &Arc<InterestTracker> {
        &self.tracker
    }

    /// Ranked digest for one subject and day.
    ///
    /// A snapshot without an interest vector gets the tracked one (or the
    /// baseline); a supplied vector is used as-is.
    pub async fn build_digest(&self, mut snapshot: ContextSnapshot) -> Digest {
        if snapshot.interest.is_none() {
            let vector = self
                .tracker
                .get_vector(snapshot.user_id, snapshot.subject_id)
                .await;
            snapshot.interest = Some(vector);
        }

        let insights = self.insights.rank(&snapshot);
        let starters = self.starters.rank(&snapshot);

        let immediate_attention: Vec<Topic> = insights
            .iter()
            .filter(|card| card.urgency >= IMMEDIATE_ACTION_THRESHOLD)
            .map(|card| card.category)
            .collect();

        info!(
            user_id = %snapshot.user_id,
            subject_id = %snapshot.subject_id,
            date = %snapshot.date,
            insight_count = insights.len(),
            starter_count = starters.len(),
            immediate_count = immediate_attention.len(),
            "Digest built"
        );

        Digest {
            user_id: snapshot.user_id,
            subject_id: snapshot.subject_id,
            date: snapshot.date,
            insights,
            starters,
            immediate_attention,
            generated_at: Utc::now(),
        }
    }

    pub async fn get_interest(&self, user_id: Uuid, subject_id: Uuid) -> InterestVector {
        self.tracker.get_vector(user_id, subject_id).await
    }

    pub async fn record_interaction(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic: &str,
        weight: f64,
    ) -> crate::services::interest::Result<InterestVector> {
        self.tracker
            .record_interaction(user_id, subject_id, topic, weight)
            .await
    }

    pub async fn set_explicit_topics(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topics: &[String],
    ) -> crate::services::interest::Result<InterestVector> {
        self.tracker
            .set_explicit_topics(user_id, subject_id, topics)
            .await
    }
}
