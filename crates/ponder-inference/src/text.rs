//! Text normalization shared by every analyzer.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a letter, digit, or whitespace.
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("valid punctuation pattern"));

/// Lowercase `text`, drop apostrophes, and turn other punctuation into spaces.
pub fn normalize(text: &str) -> String {
    let lower: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect();
    PUNCTUATION.replace_all(&lower, " ").into_owned()
}

/// Normalized tokens in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// A text prepared for repeated vocabulary lookups.
///
/// Single-word terms match whole tokens. Terms containing spaces or
/// punctuation match as substrings of the lowercased text.
pub struct TermMatcher {
    lower: String,
    words: HashSet<String>,
}

impl TermMatcher {
    pub fn new(text: &str) -> Self {
        Self {
            lower: text.to_lowercase(),
            words: tokenize(text).into_iter().collect(),
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        if is_single_word(term) {
            self.words.contains(term)
        } else {
            self.lower.contains(term)
        }
    }

    /// Distinct terms from `vocabulary` present in the text, in vocabulary order.
    pub fn matches<'a>(&self, vocabulary: &[&'a str]) -> Vec<&'a str> {
        vocabulary
            .iter()
            .copied()
            .filter(|term| self.contains(term))
            .collect()
    }

    pub fn count(&self, vocabulary: &[&str]) -> usize {
        vocabulary.iter().filter(|term| self.contains(term)).count()
    }

    pub fn any(&self, vocabulary: &[&str]) -> bool {
        vocabulary.iter().any(|term| self.contains(term))
    }
}

fn is_single_word(term: &str) -> bool {
    term.chars().all(char::is_alphanumeric)
}
