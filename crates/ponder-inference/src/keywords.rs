//! Keyword and tech-term extraction.

use std::collections::HashSet;

use ponder_core::defaults::{MAX_KEYWORDS, MIN_KEYWORD_LEN};

use crate::text::{tokenize, TermMatcher};
use crate::vocabulary::{STOP_WORDS, TECH_TERMS};

/// Salient keywords of `text`, in order of first occurrence.
///
/// Tokens are lowercased with punctuation removed; stop words and tokens
/// shorter than three characters are dropped; at most 15 are kept.
///
/// # Examples
///
/// ```
/// use ponder_inference::extract_keywords;
///
/// let keywords = extract_keywords("Retry the NATS publish, then retry again");
/// assert_eq!(keywords, vec!["retry", "nats", "publish"]);
/// ```
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| token.chars().count() >= MIN_KEYWORD_LEN)
        .filter(|token| !STOP_WORDS.contains(token.as_str()))
        .filter(|token| seen.insert(token.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}

/// Technology terms from the fixed vocabulary present in `text`.
pub fn extract_tech_terms(text: &str) -> Vec<String> {
    TermMatcher::new(text)
        .matches(TECH_TERMS)
        .into_iter()
        .map(str::to_string)
        .collect()
}
