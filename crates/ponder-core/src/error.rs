//! Error types for ponder.

use thiserror::Error;

/// Result type alias using ponder's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ponder operations.
///
/// Only the storage classes (`StorageUnavailable`, `Io`, `Serialization` on
/// the write path) are fatal to a capture. `AnalysisDegraded` is produced by
/// the analysis pipeline and is always downgraded to an `archive_only`
/// recommendation by the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Backing location cannot be created, read, or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Input rejected after cleaning (empty content, nothing to append, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A classifier, similarity, or task lookup step failed
    #[error("Analysis degraded: {0}")]
    AnalysisDegraded(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error must abort a capture.
    ///
    /// Analysis failures never do; everything touching storage does.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::AnalysisDegraded(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display_storage_unavailable() {
        let err = Error::StorageUnavailable("/ro/.ponder is read-only".to_string());
        assert_eq!(
            err.to_string(),
            "Storage unavailable: /ro/.ponder is read-only"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("task catalog".to_string());
        assert_eq!(err.to_string(), "Not found: task catalog");
    }

    #[test]
    fn test_error_display_note_not_found() {
        let id = Uuid::nil();
        let err = Error::NoteNotFound(id);
        assert_eq!(err.to_string(), format!("Note not found: {}", id));
    }

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("content is empty".to_string());
        assert_eq!(err.to_string(), "Validation error: content is empty");
    }

    #[test]
    fn test_error_display_analysis_degraded() {
        let err = Error::AnalysisDegraded("scan deadline exceeded".to_string());
        assert_eq!(err.to_string(), "Analysis degraded: scan deadline exceeded");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<i32>>("[1, oops]").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_only_analysis_errors_are_non_fatal() {
        assert!(!Error::AnalysisDegraded("x".into()).is_fatal());
        assert!(Error::StorageUnavailable("x".into()).is_fatal());
        assert!(Error::Validation("x".into()).is_fatal());
        assert!(Error::NoteNotFound(Uuid::nil()).is_fatal());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
