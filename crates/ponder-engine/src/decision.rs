//! Turning analysis results into one recommended action.
//!
//! Rules are evaluated in order and the first that fires wins:
//!
//! 1. Identical content already stored: merge into it.
//! 2. Best match above the strong threshold: merge into it.
//! 3. Best match above the related threshold and a high-priority note:
//!    schedule an interview, listing the related matches.
//! 4. High strategic value: create a new task, comprehensive when the work
//!    spans repositories, protocols, or architecture.
//! 5. Otherwise archive the note.

use tracing::debug;

use ponder_core::{
    CreationPath, FeatureVector, MatchCandidate, Recommendation, RecommendedAction,
    SimilarityResult, StrategicValue,
};

use crate::config::DecisionConfig;

/// Everything the decision rules look at.
#[derive(Debug, Clone)]
pub struct DecisionInput {
    pub features: FeatureVector,
    pub strategic_value: StrategicValue,
    pub creation_complexity: u32,
    /// Note and task matches, any order
    pub candidates: Vec<MatchCandidate>,
    /// Stored note with byte-identical content, if any
    pub exact_duplicate: Option<SimilarityResult>,
}

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn decide(&self, input: DecisionInput) -> Recommendation {
        let DecisionInput {
            features,
            strategic_value,
            creation_complexity,
            mut candidates,
            exact_duplicate,
        } = input;

        // Stable sort keeps notes ahead of tasks on equal scores.
        candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
        let limit = self.config.see_also_limit;
        let best_score = candidates.first().map(MatchCandidate::score);

        let mut recommendation = Recommendation {
            action: RecommendedAction::ArchiveOnly,
            best_match: None,
            see_also: Vec::new(),
            features: None,
            strategic_value: None,
            confidence: 0.5,
            reason: String::new(),
            degraded: false,
        };

        if let Some(duplicate) = exact_duplicate {
            recommendation.action = RecommendedAction::MergeIntoExisting;
            recommendation.reason = format!(
                "identical content already captured as note {}",
                duplicate.note_id
            );
            recommendation.confidence = 0.95;
            recommendation.see_also = candidates
                .into_iter()
                .filter(|c| !matches!(c, MatchCandidate::Note(n) if n.note_id == duplicate.note_id))
                .take(limit)
                .collect();
            recommendation.best_match = Some(MatchCandidate::Note(duplicate));
        } else if best_score.is_some_and(|s| s > self.config.strong_match_threshold) {
            let mut rest = candidates.into_iter();
            let best = rest.next();
            let score = best_score.unwrap_or_default();
            recommendation.action = RecommendedAction::MergeIntoExisting;
            recommendation.confidence =
                (0.5 + (score - self.config.strong_match_threshold) / 100.0).clamp(0.5, 0.95);
            if let Some(best) = &best {
                recommendation.reason = if best.reasons().is_empty() {
                    format!("strong match with {} (score {:.1})", best.label(), score)
                } else {
                    format!(
                        "strong match with {} (score {:.1}; {})",
                        best.label(),
                        score,
                        best.reasons().join("; ")
                    )
                };
            }
            recommendation.best_match = best;
            recommendation.see_also = rest.take(limit).collect();
        } else if best_score.is_some_and(|s| s > self.config.related_match_threshold)
            && features.is_high_priority()
        {
            recommendation.action = RecommendedAction::ScheduleInterview;
            recommendation.confidence = 0.6;
            recommendation.reason = format!(
                "related to existing work and high priority ({} complexity, {} urgency); \
                 clarify before creating a task",
                features.complexity, features.urgency
            );
            recommendation.see_also = candidates
                .into_iter()
                .filter(|c| c.score() > self.config.related_match_threshold)
                .take(limit)
                .collect();
        } else if strategic_value.score >= self.config.strategic_value_threshold {
            let path = if creation_complexity >= self.config.comprehensive_threshold {
                CreationPath::Comprehensive
            } else {
                CreationPath::Simple
            };
            recommendation.action = RecommendedAction::CreateNew(path);
            recommendation.confidence = (0.5 + strategic_value.score as f32 / 20.0).min(0.9);
            recommendation.reason = if strategic_value.impact_areas.is_empty() {
                format!("strategic value {}", strategic_value.score)
            } else {
                format!(
                    "strategic value {} (impact: {})",
                    strategic_value.score,
                    strategic_value.impact_areas.join(", ")
                )
            };
            recommendation.see_also = candidates.into_iter().take(limit).collect();
        } else {
            recommendation.reason = format!(
                "no strong match and low strategic value ({})",
                strategic_value.score
            );
            recommendation.see_also = candidates.into_iter().take(limit).collect();
        }

        debug!(
            action = recommendation.action.as_str(),
            best_score = best_score.unwrap_or(0.0),
            strategic_value = strategic_value.score,
            confidence = recommendation.confidence,
            "decision: recommendation made"
        );

        recommendation.features = Some(features);
        recommendation.strategic_value = Some(strategic_value);
        recommendation
    }
}
