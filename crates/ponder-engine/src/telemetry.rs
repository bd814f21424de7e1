//! Tracing setup and the log contract.
//!
//! Output is configured through the environment:
//!
//! - `LOG_FORMAT`: `json` or `text` (default `text`)
//! - `LOG_FILE`: path of a daily-rotated log file; logs go to stderr otherwise
//! - `LOG_ANSI`: `true`/`false` override for ANSI colors
//! - `RUST_LOG`: standard env filter (default `info` for the ponder crates)
//!
//! Levels:
//!
//! | Level | Used for |
//! |-------|----------|
//! | ERROR | data cannot be served (storage unavailable, unreadable collection) |
//! | WARN  | recoverable fallback (corrupt collection quarantined, analysis degraded) |
//! | INFO  | lifecycle (storage initialized, capture completed) |
//! | DEBUG | decisions and scan summaries |
//! | TRACE | per-item detail (feature vectors, individual scores) |
//!
//! Fields use literal identifiers (`note_id`, `corpus_size`, `score`,
//! `duration_ms`) and messages carry a `notes:`, `similarity:`,
//! `decision:`, `catalog:`, `capture:`, `storage:` or `config:` prefix.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str =
    "ponder=info,ponder_engine=info,ponder_db=info,ponder_search=info,ponder_inference=info";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub json: bool,
    pub file: Option<String>,
    pub ansi: Option<bool>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            json: get("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            file: get("LOG_FILE").filter(|v| !v.trim().is_empty()),
            ansi: get("LOG_ANSI").map(|v| v == "true" || v == "1"),
        }
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process when logging
/// to a file; dropping it flushes and stops the writer. A subscriber that is
/// already installed is left in place.
pub fn init_tracing(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(path) = &settings.file {
        let path = Path::new(path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("ponder.log");
        let appender = tracing_appender::rolling::daily(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if settings.json {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
                .try_init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(settings.ansi.unwrap_or(false));
            let _ = registry.with(layer).try_init();
        }
        Some(guard)
    } else {
        // stdout carries command output
        if settings.json {
            let _ = registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = settings.ansi {
                layer = layer.with_ansi(ansi);
            }
            let _ = registry.with(layer).try_init();
        }
        None
    }
}
