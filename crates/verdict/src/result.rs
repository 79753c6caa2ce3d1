//! Result and error types for Verdict.

use thiserror::Error;

/// Result type for Verdict operations
pub type VerdictResult<T> = Result<T, VerdictError>;

/// Errors that can occur while loading results or writing a report
#[derive(Debug, Error)]
pub enum VerdictError {
    /// Serialized results did not have the shape of a suite tree
    #[error("Invalid result tree: {message}")]
    InvalidTree {
        /// Error message
        message: String,
    },

    /// Report could not be produced
    #[error("Report generation failed: {message}")]
    Report {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VerdictError {
    /// Create an invalid tree error
    #[must_use]
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    /// Create a report generation error
    #[must_use]
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}
