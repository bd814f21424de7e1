//! Core traits for ponder abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, so the capture pipeline can be driven against the file store in
//! production and against in-memory doubles in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Durable note collection.
///
/// Implementations assume at most one in-flight mutating operation per
/// backing location. Read-only methods may run concurrently with each other
/// but are not guaranteed to observe an in-flight write.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Ensure the backing location and index exist. Idempotent.
    async fn initialize(&self) -> Result<()>;

    /// Persist a new note, assigning id, timestamps and content hash.
    async fn store(&self, draft: NoteDraft) -> Result<Note>;

    /// Every stored note, in no particular order.
    ///
    /// A missing or corrupted collection yields an empty vector.
    async fn load_all(&self) -> Vec<Note>;

    /// Fetch a single note.
    async fn get(&self, id: Uuid) -> Result<Option<Note>>;

    /// Filter notes; results are newest-first and truncated to `limit`.
    async fn find(&self, criteria: &NoteCriteria) -> Result<Vec<Note>>;

    /// Append a dated addendum and union `new_tags` into the note.
    async fn update_append(&self, id: Uuid, addendum: &str, new_tags: &[String])
        -> Result<Note>;

    /// Hard-delete a note. Returns `false` when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Corpus statistics.
    async fn stats(&self) -> Result<CorpusStats>;

    /// Classify notes into aging/stale bands relative to `days_old`.
    async fn aging_report(&self, days_old: u32) -> Result<AgingReport>;
}

// =============================================================================
// TASK CATALOG
// =============================================================================

/// Read-only view of the structured tasks managed outside ponder.
#[async_trait]
pub trait TaskCatalog: Send + Sync {
    /// Existing tasks, optionally restricted to one repository.
    async fn list_existing_tasks(&self, repository_scope: Option<&str>)
        -> Result<Vec<ExistingTask>>;
}
