//! # ponder-search
//!
//! Relatedness scoring for ponder.
//!
//! This crate provides:
//! - Weighted note-to-note similarity (keywords, tags, context, recency)
//! - Note-to-task scoring against an external task catalog
//! - A deadline-bounded linear scan over the corpus
//!
//! ## Example
//!
//! ```rust,no_run
//! use ponder_search::{SimilarityEngine, SimilarityQuery};
//!
//! # fn demo(corpus: &[ponder_search::Note]) -> ponder_search::Result<()> {
//! let engine = SimilarityEngine::default();
//! let query = SimilarityQuery::new("Retry NATS publishes with backoff", &[], None);
//! for hit in engine.find_similar(&query, corpus, chrono::Utc::now())? {
//!     println!("{:.1} {}", hit.score, hit.preview);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod similarity;
pub mod tasks;

// Re-export core types
pub use ponder_core::*;

pub use config::SimilarityConfig;
pub use similarity::{SimilarityEngine, SimilarityQuery};
