//! Shared error types for debtpilot
//!
//! The variants follow how each failure is handled by a cycle:
//! - `Collection`: unreadable inputs, logged and degraded to zero counts
//! - `Configuration`: invalid weights or thresholds, fatal at startup
//! - `ActionApplication`: one candidate failed, recorded in its decision
//! - `Persistence`: history or schedule write failed, fatal for the cycle
//! - `RunInProgress`: another cycle holds the run lock, cycle skipped

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for debtpilot operations
#[derive(Debug, Error)]
pub enum Error {
    /// Source files or candidate files could not be read
    #[error("Collection error: {0}")]
    Collection(String),

    /// Invalid configuration (weights, thresholds, intervals)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An action executor failed for a single candidate
    #[error("Action for candidate '{candidate}' failed: {reason}")]
    ActionApplication { candidate: String, reason: String },

    /// Run history or schedule state could not be written or read
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Another cycle currently holds the run lock
    #[error("A run is already in progress (lock held at {0})")]
    RunInProgress(PathBuf),

    /// An attempt to mutate an existing history entry
    #[error("History violation: {0}")]
    HistoryViolation(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a persistence error with path context
    pub fn persistence(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Persistence {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Wrap an IO error that happened while persisting `path`
    pub fn persistence_io(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Configuration errors stop the process; everything else only
    /// affects the current cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_fatal() {
        assert!(Error::configuration("weights sum to 0.9").is_fatal());
        assert!(!Error::persistence("disk full", "/tmp/x").is_fatal());
        assert!(!Error::RunInProgress(PathBuf::from("run.lock")).is_fatal());
    }

    #[test]
    fn persistence_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::persistence_io("write failed", "/state/runs", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Persistence error: write failed");
    }
}
