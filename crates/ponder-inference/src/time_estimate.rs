//! Reading time and implementation effort.

use ponder_core::defaults::{BASE_IMPLEMENTATION_HOURS, READING_WORDS_PER_MINUTE};
use ponder_core::{
    Complexity, EstimateConfidence, ImplementationEstimate, TaskCategory, TimeEstimate,
};

use crate::category::{category_multiplier, infer_category};
use crate::complexity::estimate_complexity;
use crate::keywords::extract_tech_terms;
use crate::text::TermMatcher;
use crate::vocabulary::INTEGRATION_TERMS;

const MIN_FACTOR: f32 = 0.75;
const MAX_FACTOR: f32 = 1.5;
const TECH_TERMS_FOR_DOWNGRADE: usize = 3;

/// Estimate reading and implementation time for `text`.
///
/// When `category` is `None` it is inferred from the text.
pub fn estimate_time(text: &str, category: Option<TaskCategory>) -> TimeEstimate {
    let category = category.unwrap_or_else(|| infer_category(text));
    let complexity = estimate_complexity(text).level;
    let tech_terms = extract_tech_terms(text).len();
    let has_integration = TermMatcher::new(text).any(INTEGRATION_TERMS);

    TimeEstimate {
        reading_minutes: reading_minutes(text),
        implementation: implementation_estimate(category, complexity, tech_terms, has_integration),
    }
}

/// Minutes to read `text`, rounded up, so any non-empty text takes at least one.
pub fn reading_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    words.div_ceil(READING_WORDS_PER_MINUTE) as u32
}

fn complexity_multiplier(complexity: Complexity) -> f32 {
    match complexity {
        Complexity::Low => 1.0,
        Complexity::Medium => 2.0,
        Complexity::High => 4.0,
    }
}

fn implementation_estimate(
    category: TaskCategory,
    complexity: Complexity,
    tech_terms: usize,
    has_integration: bool,
) -> ImplementationEstimate {
    let hours =
        BASE_IMPLEMENTATION_HOURS * category_multiplier(category) * complexity_multiplier(complexity);

    let mut confidence = EstimateConfidence::High;
    if tech_terms >= TECH_TERMS_FOR_DOWNGRADE {
        confidence = confidence.downgrade();
    }
    if has_integration {
        confidence = confidence.downgrade();
    }

    ImplementationEstimate {
        min_hours: hours * MIN_FACTOR,
        max_hours: hours * MAX_FACTOR,
        confidence,
    }
}
