//! # ponder-engine
//!
//! Capture pipeline for ponder: stores a thought, relates it to earlier notes
//! and existing tasks, and recommends what to do with it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ponder_engine::{CaptureRequest, PonderConfig, ThoughtService};
//!
//! # async fn demo() -> ponder_engine::Result<()> {
//! let config = PonderConfig::load(std::path::Path::new("."))?;
//! let service = ThoughtService::from_config(&config)?;
//! service.initialize().await?;
//!
//! let outcome = service
//!     .capture(CaptureRequest::new("Retry NATS publishes with backoff").with_tags(["nats"]))
//!     .await?;
//! println!("{}", outcome.summary);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod decision;
pub mod render;
pub mod service;
pub mod telemetry;

pub use ponder_core::*;

pub use catalog::{JsonTaskCatalog, NoTaskCatalog, StaticTaskCatalog};
pub use config::{ConfigError, DecisionConfig, PonderConfig, StorageConfig};
pub use decision::{DecisionEngine, DecisionInput};
pub use service::{CaptureOutcome, CaptureRequest, ThoughtService};
pub use telemetry::{init_tracing, LogSettings};
