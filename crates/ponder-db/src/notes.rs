//! File-backed note repository.
//!
//! The whole collection is one pretty-printed JSON array. Every mutation
//! reads the full collection, applies the change, and rewrites it through
//! [`FilesystemBackend::write_atomic`]; the corpus index is refreshed after
//! each successful rewrite.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use ponder_core::defaults::{INDEX_FILE_NAME, NOTES_FILE_NAME, STORAGE_DIR_NAME, TOP_TAGS_LIMIT};
use ponder_core::{
    new_v7, AgingReport, CorpusStats, Error, Note, NoteCriteria, NoteDraft, NoteRepository,
    Result,
};

use crate::aging::{build_aging_report, count_recent};
use crate::index::CorpusIndex;
use crate::storage::FilesystemBackend;
use crate::validation::{clean_addendum, clean_draft, clean_tags};

/// Compute the SHA256 hash of note content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// State of the persisted collection as found on disk.
enum Collection {
    Loaded(Vec<Note>),
    Missing,
    Corrupt(String),
}

/// JSON-file implementation of [`NoteRepository`].
///
/// Mutations within one instance are serialized by an internal lock. Two
/// instances (or two processes) pointed at the same directory are NOT
/// coordinated: the last writer wins. Hosts sharing a store must wrap it in
/// a single owner (one instance behind an `Arc`, an actor, or a
/// single-threaded executor).
pub struct FileNoteRepository {
    backend: FilesystemBackend,
    write_lock: Mutex<()>,
}

impl FileNoteRepository {
    /// Store rooted directly at `storage_dir`.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: FilesystemBackend::new(storage_dir),
            write_lock: Mutex::new(()),
        }
    }

    /// Store in the conventional hidden directory of a workspace.
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::new(workspace_root.join(STORAGE_DIR_NAME))
    }

    pub fn storage_dir(&self) -> &Path {
        self.backend.base_path()
    }

    async fn read_collection(&self) -> Result<Collection> {
        let Some(bytes) = self.backend.read(NOTES_FILE_NAME).await? else {
            return Ok(Collection::Missing);
        };
        match serde_json::from_slice::<Vec<Note>>(&bytes) {
            Ok(mut notes) => {
                for note in notes.iter_mut().filter(|n| n.hash.is_empty()) {
                    note.hash = hash_content(&note.content);
                }
                Ok(Collection::Loaded(notes))
            }
            Err(e) => Ok(Collection::Corrupt(e.to_string())),
        }
    }

    /// Read the collection for a mutation.
    ///
    /// A corrupt file is quarantined so the rewrite cannot destroy it; I/O
    /// failures are fatal here, unlike on the read path.
    async fn load_for_write(&self) -> Result<Vec<Note>> {
        match self.read_collection().await.map_err(|e| {
            Error::StorageUnavailable(format!("reading {}: {}", NOTES_FILE_NAME, e))
        })? {
            Collection::Loaded(notes) => Ok(notes),
            Collection::Missing => Ok(Vec::new()),
            Collection::Corrupt(reason) => {
                error!(error = %reason, "notes: collection corrupt, starting a fresh one");
                self.backend.quarantine(NOTES_FILE_NAME).await?;
                Ok(Vec::new())
            }
        }
    }

    /// Rewrite the collection, then refresh the index.
    ///
    /// Index failures are logged only: the index is a cache.
    async fn persist(&self, notes: &[Note]) -> Result<()> {
        let data = serde_json::to_vec_pretty(notes)?;
        self.backend.write_atomic(NOTES_FILE_NAME, &data).await?;

        let mut index = CorpusIndex::rebuild(notes);
        index.last_updated = Some(Utc::now());
        if let Err(e) = self.write_index(&index).await {
            warn!(error = %e, "notes: failed to refresh corpus index");
        }
        Ok(())
    }

    async fn write_index(&self, index: &CorpusIndex) -> Result<()> {
        let data = serde_json::to_vec_pretty(index)?;
        self.backend.write_atomic(INDEX_FILE_NAME, &data).await
    }

    async fn read_index(&self) -> Option<CorpusIndex> {
        let bytes = self.backend.read(INDEX_FILE_NAME).await.ok()??;
        match serde_json::from_slice(&bytes) {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(error = %e, "notes: corpus index unreadable, will rebuild");
                None
            }
        }
    }

    /// Cached index if it still matches `notes`, otherwise a rebuilt one.
    ///
    /// A rebuilt index is written back only when no mutation is in flight.
    async fn index_for(&self, notes: &[Note]) -> CorpusIndex {
        if let Some(index) = self.read_index().await {
            if index.is_consistent_with(notes) {
                return index;
            }
            debug!(
                cached_total = index.total,
                corpus_size = notes.len(),
                "notes: corpus index stale"
            );
        }
        let index = CorpusIndex::rebuild(notes);
        if let Ok(_guard) = self.write_lock.try_lock() {
            if let Err(e) = self.write_index(&index).await {
                warn!(error = %e, "notes: failed to write rebuilt corpus index");
            }
        }
        index
    }

    fn unique_id(existing: &[Note]) -> Uuid {
        let taken: HashSet<Uuid> = existing.iter().map(|n| n.id).collect();
        loop {
            let id = new_v7();
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}

fn matches_criteria(note: &Note, criteria: &NoteCriteria) -> bool {
    if let Some(tags) = criteria.tags.as_ref().filter(|t| !t.is_empty()) {
        let any = tags
            .iter()
            .any(|wanted| note.tags.iter().any(|t| t.eq_ignore_ascii_case(wanted)));
        if !any {
            return false;
        }
    }
    if let Some(needle) = criteria.content_substring.as_ref().filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        let in_content = note.content.to_lowercase().contains(&needle);
        let in_context = note
            .context
            .as_ref()
            .is_some_and(|c| c.to_lowercase().contains(&needle));
        if !in_content && !in_context {
            return false;
        }
    }
    if criteria.created_after.is_some_and(|after| note.created_at < after) {
        return false;
    }
    if criteria.created_before.is_some_and(|before| note.created_at > before) {
        return false;
    }
    true
}

#[async_trait]
impl NoteRepository for FileNoteRepository {
    async fn initialize(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.backend.ensure_ready().await?;

        if !self.backend.exists(NOTES_FILE_NAME).await? {
            self.backend.write_atomic(NOTES_FILE_NAME, b"[]").await?;
            info!(storage_path = %self.storage_dir().display(), "notes: created empty collection");
        }

        let notes = match self.read_collection().await? {
            Collection::Loaded(notes) => notes,
            Collection::Missing => Vec::new(),
            Collection::Corrupt(reason) => {
                error!(error = %reason, "notes: collection corrupt at startup, treating as empty");
                Vec::new()
            }
        };

        let index_ok = self
            .read_index()
            .await
            .is_some_and(|index| index.is_consistent_with(&notes));
        if !index_ok {
            self.write_index(&CorpusIndex::rebuild(&notes)).await?;
            debug!(corpus_size = notes.len(), "notes: corpus index rebuilt");
        }
        Ok(())
    }

    async fn store(&self, draft: NoteDraft) -> Result<Note> {
        let draft = clean_draft(draft)?;
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_for_write().await?;

        let now = Utc::now();
        let note = Note {
            id: Self::unique_id(&notes),
            hash: hash_content(&draft.content),
            content: draft.content,
            tags: draft.tags,
            context: draft.context,
            created_at: now,
            updated_at: now,
        };
        notes.push(note.clone());
        self.persist(&notes).await?;

        info!(note_id = %note.id, corpus_size = notes.len(), "notes: stored");
        Ok(note)
    }

    async fn load_all(&self) -> Vec<Note> {
        match self.read_collection().await {
            Ok(Collection::Loaded(notes)) => notes,
            Ok(Collection::Missing) => {
                warn!(storage_path = %self.storage_dir().display(), "notes: collection missing, corpus empty");
                Vec::new()
            }
            Ok(Collection::Corrupt(reason)) => {
                error!(error = %reason, "notes: collection corrupt, corpus empty");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "notes: collection unreadable, corpus empty");
                Vec::new()
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Note>> {
        Ok(self.load_all().await.into_iter().find(|n| n.id == id))
    }

    async fn find(&self, criteria: &NoteCriteria) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .load_all()
            .await
            .into_iter()
            .filter(|n| matches_criteria(n, criteria))
            .collect();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = criteria.limit {
            notes.truncate(limit);
        }
        debug!(result_count = notes.len(), "notes: find");
        Ok(notes)
    }

    async fn update_append(
        &self,
        id: Uuid,
        addendum: &str,
        new_tags: &[String],
    ) -> Result<Note> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_for_write().await?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        let addendum = clean_addendum(addendum);
        let new_tags = clean_tags(new_tags);
        if addendum.is_empty() && new_tags.is_empty() {
            return Err(Error::Validation(
                "nothing to append: addendum and tags are both empty".to_string(),
            ));
        }

        let now = Utc::now();
        if !addendum.is_empty() {
            note.content = format!(
                "{}\n\n---\n**Update ({}):**\n{}",
                note.content,
                now.format("%Y-%m-%d %H:%M UTC"),
                addendum
            );
            note.hash = hash_content(&note.content);
        }
        for tag in new_tags {
            if !note.tags.contains(&tag) {
                note.tags.push(tag);
            }
        }
        note.updated_at = now.max(note.created_at);

        let updated = note.clone();
        self.persist(&notes).await?;
        info!(note_id = %id, "notes: appended");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_for_write().await?;
        let Some(pos) = notes.iter().position(|n| n.id == id) else {
            debug!(note_id = %id, "notes: delete of unknown id");
            return Ok(false);
        };
        notes.remove(pos);
        self.persist(&notes).await?;
        info!(note_id = %id, corpus_size = notes.len(), "notes: deleted");
        Ok(true)
    }

    async fn stats(&self) -> Result<CorpusStats> {
        let notes = self.load_all().await;
        let index = self.index_for(&notes).await;
        Ok(CorpusStats {
            total: index.total,
            recent_count: count_recent(&notes, Utc::now()),
            top_tags: index.top_tags(TOP_TAGS_LIMIT),
            storage_size_bytes: self.backend.size(NOTES_FILE_NAME).await,
            last_updated: index.last_updated,
        })
    }

    async fn aging_report(&self, days_old: u32) -> Result<AgingReport> {
        let notes = self.load_all().await;
        build_aging_report(&notes, days_old, Utc::now())
    }
}
