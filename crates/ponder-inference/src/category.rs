//! Task category inference.

use ponder_core::TaskCategory;

use crate::text::TermMatcher;
use crate::vocabulary::CATEGORY_TERMS;

/// Category with the most signal hits; `General` when nothing matches.
///
/// Ties go to the category listed first in [`TaskCategory::ALL`].
pub fn infer_category(text: &str) -> TaskCategory {
    let matcher = TermMatcher::new(text);
    let mut best = (TaskCategory::General, 0);
    for (category, terms) in CATEGORY_TERMS {
        let hits = matcher.count(terms);
        if hits > best.1 {
            best = (*category, hits);
        }
    }
    best.0
}

/// Multiplier applied to the base implementation estimate.
pub fn category_multiplier(category: TaskCategory) -> f32 {
    match category {
        TaskCategory::Bug => 0.75,
        TaskCategory::Feature => 1.5,
        TaskCategory::Refactor => 1.25,
        TaskCategory::Infrastructure => 1.5,
        TaskCategory::Documentation => 0.5,
        TaskCategory::Testing | TaskCategory::Research | TaskCategory::General => 1.0,
    }
}
