//! Error types for status documents

use thiserror::Error;

/// Errors raised when reading or writing status documents
#[derive(Debug, Error)]
pub enum StatusError {
    /// The document could not be reconstructed: malformed JSON, a missing
    /// required field, or an unrecognized state value
    #[error("invalid status document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document could not be read or written
    #[error("status document I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
