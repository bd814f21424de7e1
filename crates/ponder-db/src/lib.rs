//! # ponder-db
//!
//! File-backed persistence for ponder.
//!
//! This crate provides:
//! - An atomic-rename filesystem backend
//! - The JSON note collection implementing [`NoteRepository`]
//! - The derived, rebuildable corpus index
//! - Input cleaning and validation
//! - Aging and recency reporting
//!
//! ## Example
//!
//! ```rust,no_run
//! use ponder_db::{FileNoteRepository, NoteDraft, NoteRepository};
//!
//! # async fn demo() -> ponder_db::Result<()> {
//! let store = FileNoteRepository::for_workspace(std::path::Path::new("."));
//! store.initialize().await?;
//!
//! let note = store
//!     .store(NoteDraft::new("Retry NATS publishes with backoff").with_tags(["reliability"]))
//!     .await?;
//! println!("Stored note: {}", note.id);
//! # Ok(())
//! # }
//! ```

pub mod aging;
pub mod index;
pub mod notes;
pub mod storage;
pub mod validation;

// Re-export core types
pub use ponder_core::*;

pub use aging::{build_aging_report, classify_age, count_recent};
pub use index::CorpusIndex;
pub use notes::{hash_content, FileNoteRepository};
pub use storage::FilesystemBackend;
pub use validation::{clean_addendum, clean_draft, clean_tags};
