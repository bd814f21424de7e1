//! Derived corpus index.
//!
//! The index is a cache over the note collection: total count, per-tag
//! frequencies, and when the collection last changed. It is persisted next to
//! the collection for cheap stats, but can always be rebuilt from the notes
//! and is never consulted for note content.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ponder_core::defaults::INDEX_VERSION;
use ponder_core::{Note, TagCount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusIndex {
    pub version: u32,
    pub total: usize,
    pub tag_counts: BTreeMap<String, usize>,
    /// When the collection last changed; `None` for a never-written corpus
    pub last_updated: Option<DateTime<Utc>>,
}

impl CorpusIndex {
    /// Rebuild from a full scan of the collection.
    ///
    /// `last_updated` is the newest `updated_at` in the collection. Writers
    /// overwrite it with the write time, since a deletion changes the corpus
    /// without touching any remaining note.
    pub fn rebuild(notes: &[Note]) -> Self {
        let mut tag_counts = BTreeMap::new();
        for note in notes {
            for tag in &note.tags {
                *tag_counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        let last_updated = notes.iter().map(|n| n.updated_at).max();

        Self {
            version: INDEX_VERSION,
            total: notes.len(),
            tag_counts,
            last_updated,
        }
    }

    /// Whether the cached counts still describe `notes`.
    ///
    /// Only totals are compared; a full tag comparison would cost as much as
    /// a rebuild.
    pub fn is_consistent_with(&self, notes: &[Note]) -> bool {
        self.version == INDEX_VERSION && self.total == notes.len()
    }

    /// Most frequent tags, count descending then name ascending.
    pub fn top_tags(&self, limit: usize) -> Vec<TagCount> {
        let mut tags: Vec<TagCount> = self
            .tag_counts
            .iter()
            .map(|(tag, count)| TagCount {
                tag: tag.clone(),
                count: *count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        tags.truncate(limit);
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn note(tags: &[&str], updated_at: DateTime<Utc>) -> Note {
        Note {
            id: Uuid::now_v7(),
            content: "x".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            context: None,
            created_at: updated_at,
            updated_at,
            hash: String::new(),
        }
    }

    #[test]
    fn test_rebuild_counts_tags() {
        let now = Utc::now();
        let notes = vec![
            note(&["nats", "reliability"], now),
            note(&["nats"], now),
            note(&[], now),
        ];
        let index = CorpusIndex::rebuild(&notes);
        assert_eq!(index.total, 3);
        assert_eq!(index.tag_counts["nats"], 2);
        assert_eq!(index.tag_counts["reliability"], 1);
    }

    #[test]
    fn test_rebuild_tracks_newest_update() {
        let now = Utc::now();
        let notes = vec![note(&[], now - Duration::days(3)), note(&[], now)];
        assert_eq!(CorpusIndex::rebuild(&notes).last_updated, Some(now));
        assert_eq!(CorpusIndex::rebuild(&[]).last_updated, None);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let now = Utc::now();
        let notes = vec![note(&["API"], now), note(&["api"], now)];
        let index = CorpusIndex::rebuild(&notes);
        assert_eq!(index.tag_counts.len(), 2);
    }

    #[test]
    fn test_top_tags_ordering() {
        let now = Utc::now();
        let notes = vec![
            note(&["b", "a"], now),
            note(&["b", "c"], now),
            note(&["a"], now),
            note(&["b"], now),
        ];
        let top = CorpusIndex::rebuild(&notes).top_tags(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], TagCount { tag: "b".into(), count: 3 });
        assert_eq!(top[1], TagCount { tag: "a".into(), count: 2 });
    }

    #[test]
    fn test_consistency_check_detects_drift() {
        let now = Utc::now();
        let notes = vec![note(&[], now)];
        let index = CorpusIndex::rebuild(&notes);
        assert!(index.is_consistent_with(&notes));
        assert!(!index.is_consistent_with(&[]));
    }
}
