//! Cleaning and validation of caller input.
//!
//! Input is repaired where possible (trimmed, control characters stripped,
//! oversized values truncated with a warning) and rejected only when nothing
//! usable remains.

use ponder_core::defaults::{MAX_CONTENT_CHARS, MAX_CONTEXT_CHARS, MAX_TAGS, MAX_TAG_CHARS};
use ponder_core::{Error, NoteDraft, Result};
use tracing::warn;

/// Clean a draft before it is persisted.
pub fn clean_draft(draft: NoteDraft) -> Result<NoteDraft> {
    let content = clean_text(&draft.content, MAX_CONTENT_CHARS, "content");
    if content.is_empty() {
        return Err(Error::Validation("content is empty".to_string()));
    }

    let context = draft
        .context
        .as_deref()
        .map(|c| clean_text(c, MAX_CONTEXT_CHARS, "context"))
        .filter(|c| !c.is_empty());

    Ok(NoteDraft {
        content,
        tags: clean_tags(&draft.tags),
        context,
    })
}

/// Clean an append-update addendum. May return an empty string.
pub fn clean_addendum(addendum: &str) -> String {
    clean_text(addendum, MAX_CONTENT_CHARS, "addendum")
}

/// Normalize a tag list.
///
/// Each tag is trimmed, a leading `#` removed, inner whitespace collapsed to
/// `-`, and truncated. Empty tags are dropped. Duplicates are removed with
/// case-sensitive comparison, keeping the first occurrence.
pub fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for raw in tags {
        let tag = raw.trim().trim_start_matches('#');
        let tag = tag.split_whitespace().collect::<Vec<_>>().join("-");
        let tag: String = tag
            .chars()
            .filter(|c| !c.is_control())
            .take(MAX_TAG_CHARS)
            .collect();
        if tag.is_empty() || cleaned.contains(&tag) {
            continue;
        }
        cleaned.push(tag);
    }
    if cleaned.len() > MAX_TAGS {
        warn!(
            tag_count = cleaned.len(),
            max = MAX_TAGS,
            "validation: too many tags, keeping the first"
        );
        cleaned.truncate(MAX_TAGS);
    }
    cleaned
}

/// Trim, strip control characters other than newline/tab, and truncate.
fn clean_text(text: &str, max_chars: usize, field: &str) -> String {
    let stripped: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let char_count = stripped.chars().count();
    if char_count > max_chars {
        warn!(
            field,
            length = char_count,
            max = max_chars,
            "validation: truncating oversized input"
        );
        return stripped.chars().take(max_chars).collect::<String>().trim_end().to_string();
    }
    stripped
}
