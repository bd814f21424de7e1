//! Complexity estimation from weighted term buckets.

use ponder_core::{Complexity, ComplexityAssessment};

use crate::text::TermMatcher;
use crate::vocabulary::COMPLEXITY_BUCKETS;

pub const HIGH_COMPLEXITY_SCORE: u32 = 8;
pub const MEDIUM_COMPLEXITY_SCORE: u32 = 4;

/// Score `text` as the sum over buckets of distinct term hits × bucket weight.
///
/// The result depends only on which terms occur, not on order or repetition.
pub fn estimate_complexity(text: &str) -> ComplexityAssessment {
    let matcher = TermMatcher::new(text);
    let mut score = 0;
    let mut signals = Vec::new();

    for (_bucket, weight, terms) in COMPLEXITY_BUCKETS {
        let hits = matcher.matches(terms);
        score += hits.len() as u32 * weight;
        signals.extend(hits.into_iter().map(str::to_string));
    }

    ComplexityAssessment {
        level: level_for(score),
        score,
        signals,
    }
}

fn level_for(score: u32) -> Complexity {
    if score >= HIGH_COMPLEXITY_SCORE {
        Complexity::High
    } else if score >= MEDIUM_COMPLEXITY_SCORE {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}
