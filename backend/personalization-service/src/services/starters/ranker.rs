// ============================================
// Starter Ranker (对话开场排序)
// ============================================
//
// score = base(priority label) + category bonus, capped at 100
// Stable sort by score desc, keep the top N.

use super::generators::{StarterGenerator, DEFAULT_GENERATORS};
use crate::models::{ContextSnapshot, ConversationStarter, PriorityLevel, StarterCandidate};
use tracing::info;

pub const DEFAULT_MAX_STARTERS: usize = 10;

const MAX_STARTER_SCORE: u8 = 100;

pub struct StarterRanker {
    generators: Vec<StarterGenerator>,
    output_limit: usize,
}

impl Default for StarterRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STARTERS)
    }
}

impl StarterRanker {
    /// Ranker over the built-in rules
    pub fn new(output_limit: usize) -> Self {
        Self {
            generators: DEFAULT_GENERATORS.to_vec(),
            output_limit,
        }
    }

    /// Ranker over a custom rule list
    pub fn with_generators(output_limit: usize, generators: Vec<StarterGenerator>) -> Self {
        Self {
            generators,
            output_limit,
        }
    }

    pub fn rank(&self, ctx: &ContextSnapshot) -> Vec<ConversationStarter> {
        let candidates: Vec<StarterCandidate> = self
            .generators
            .iter()
            .flat_map(|generate| generate(ctx))
            .collect();
        let input_count = candidates.len();

        let mut starters: Vec<ConversationStarter> =
            candidates.into_iter().map(score_candidate).collect();

        starters.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
        starters.truncate(self.output_limit);

        info!(
            subject_id = %ctx.subject_id,
            input_count = input_count,
            output_count = starters.len(),
            "Starter ranking completed"
        );

        starters
    }
}

fn base_score(priority: PriorityLevel) -> u8 {
    match priority {
        PriorityLevel::High => 70,
        PriorityLevel::Medium => 50,
        PriorityLevel::Low => 30,
    }
}

pub fn score_candidate(candidate: StarterCandidate) -> ConversationStarter {
    let score = base_score(candidate.priority)
        .saturating_add(candidate.category.bonus())
        .min(MAX_STARTER_SCORE);

    ConversationStarter {
        category: candidate.category,
        title: candidate.title,
        prompt: candidate.prompt,
        context: candidate.context,
        priority: candidate.priority,
        priority_score: score,
        icon: candidate.icon.to_string(),
    }
}
