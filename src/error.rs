//! Library error types.

use thiserror::Error;

/// Errors raised while analyzing a batch of forks.
#[derive(Error, Debug)]
pub enum InsightError {
    /// A batch element could not be read as a fork record.
    #[error("Fork record {index} is malformed: {reason}")]
    InvalidRecord {
        /// Position of the element in the input array.
        index: usize,
        /// Deserialization failure.
        reason: String,
    },

    /// The original repository is not given as `owner/name`.
    #[error("Original repository '{0}' is not of the form owner/name")]
    InvalidRepoSlug(String),

    /// The fork record names no owner.
    #[error("Fork record for '{0}' has no owner")]
    MissingOwner(String),

    /// Input is not a JSON array of fork records.
    #[error("Input is not a list of fork records: {0}")]
    InvalidInput(String),
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, InsightError>;
