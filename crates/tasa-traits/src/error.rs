//! Error types for trait operations.

use thiserror::Error;

/// Common error type for source operations.
#[derive(Debug, Clone, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse error in a fetched document
    #[error("parse error: {0}")]
    ParseError(String),

    /// Malformed schedule row
    #[error("schedule parse error at line {line}: {reason}")]
    ScheduleParse {
        /// One-based line number (0 when the whole file is unusable)
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TraitError {
    /// Creates a schedule parse error.
    pub fn schedule_parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ScheduleParse {
            line,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}
