//! One-call analysis bundling every heuristic.

use ponder_core::FeatureVector;
use tracing::trace;

use crate::category::infer_category;
use crate::complexity::estimate_complexity;
use crate::keywords::{extract_keywords, extract_tech_terms};
use crate::time_estimate::estimate_time;
use crate::tone::analyze_tone;

/// Derive the full feature vector for `text`.
pub fn analyze(text: &str) -> FeatureVector {
    let tone = analyze_tone(text);
    let complexity = estimate_complexity(text);
    let category = infer_category(text);

    let features = FeatureVector {
        keywords: extract_keywords(text),
        tech_terms: extract_tech_terms(text),
        urgency: tone.urgency,
        sentiment: tone.sentiment,
        tone_confidence: tone.confidence,
        complexity: complexity.level,
        complexity_score: complexity.score,
        category,
        time: estimate_time(text, Some(category)),
    };
    trace!(
        keyword_count = features.keywords.len(),
        complexity = %features.complexity,
        urgency = %features.urgency,
        category = %features.category,
        "analysis: features extracted"
    );
    features
}
