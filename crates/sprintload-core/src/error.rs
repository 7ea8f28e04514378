//! Core error types.

use thiserror::Error;

/// Errors raised while loading the inputs of a report run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The manual override payload was not a JSON object of key -> hours.
    #[error("invalid manual overrides JSON: {0}")]
    InvalidOverrides(serde_json::Error),

    /// A snapshot line or document could not be decoded.
    #[error("invalid snapshot at line {line}")]
    Snapshot {
        /// 1-based line of the offending record.
        line: usize,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// Reading or writing the snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
