// error.rs — Error types for goal tracking and persistence.

use thiserror::Error;

use crate::goal::GoalId;

/// Errors that can occur while creating, progressing, or persisting goals.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A goal was constructed with parameters it can never satisfy.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A goal position outside the store was addressed.
    #[error("goal index {index} out of range (store holds {len} goal(s))")]
    IndexOutOfRange { index: usize, len: usize },

    /// No goal carries the requested identifier.
    #[error("goal not found: {0}")]
    NotFound(GoalId),

    /// A persisted record could not be decoded.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The underlying stream failed during save or load.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// The configuration file exists but could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl GoalError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        GoalError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
