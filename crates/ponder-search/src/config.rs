//! Similarity scoring configuration.

use serde::{Deserialize, Serialize};

use ponder_core::defaults::{
    CONTENT_OVERLAP_SCALE, CONTENT_WEIGHT, CONTEXT_WEIGHT, INCLUSION_THRESHOLD,
    KEYWORD_REASON_RATIO, RECENCY_WEIGHT, RECENCY_WINDOW_DAYS, SCAN_BUDGET_MS, TAG_WEIGHT,
};

/// Weights and thresholds for similarity scoring.
///
/// The four weights bound their signals, so with the defaults a score is
/// always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Points for identical keyword sets
    pub content_weight: f32,
    /// Multiplier applied to the raw keyword overlap before squaring
    pub content_overlap_scale: f32,
    /// Unscaled keyword overlap above which shared keywords are listed as a reason
    pub keyword_reason_ratio: f32,
    /// Points for identical tag sets
    pub tag_weight: f32,
    /// Flat points when both contexts share a term
    pub context_weight: f32,
    /// Points for a note created this instant, decaying to zero
    pub recency_weight: f32,
    /// Age in days at which the recency bonus reaches zero
    pub recency_window_days: f32,
    /// Scores must exceed this to be reported
    pub inclusion_threshold: f32,
    /// Wall-clock budget for one corpus scan
    pub scan_budget_ms: u64,
    pub max_reason_keywords: usize,
    pub max_reason_context_terms: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            content_weight: CONTENT_WEIGHT,
            content_overlap_scale: CONTENT_OVERLAP_SCALE,
            keyword_reason_ratio: KEYWORD_REASON_RATIO,
            tag_weight: TAG_WEIGHT,
            context_weight: CONTEXT_WEIGHT,
            recency_weight: RECENCY_WEIGHT,
            recency_window_days: RECENCY_WINDOW_DAYS,
            inclusion_threshold: INCLUSION_THRESHOLD,
            scan_budget_ms: SCAN_BUDGET_MS,
            max_reason_keywords: 3,
            max_reason_context_terms: 2,
        }
    }
}

impl SimilarityConfig {
    /// Set the inclusion threshold.
    pub fn with_inclusion_threshold(mut self, threshold: f32) -> Self {
        self.inclusion_threshold = threshold;
        self
    }

    /// Set the scan budget.
    pub fn with_scan_budget_ms(mut self, budget_ms: u64) -> Self {
        self.scan_budget_ms = budget_ms;
        self
    }

    /// Highest score any pair can reach.
    pub fn max_score(&self) -> f32 {
        self.content_weight + self.tag_weight + self.context_weight + self.recency_weight
    }
}
