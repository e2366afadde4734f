//! Dataset store error types
//!
//! Error codes:
//! - TABSERVE_DATASET_NOT_FOUND
//! - TABSERVE_DATASET_EMPTY
//! - TABSERVE_DATASET_TOO_LARGE
//! - TABSERVE_DATASET_MALFORMED
//! - TABSERVE_DATASET_UNREADABLE

use thiserror::Error;

/// Result type for dataset store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced while locating or reading a dataset file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No file in the store matches the requested name
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// The file is entirely empty or has a header but no data rows
    #[error("Dataset is empty: {0}")]
    EmptyFile(String),

    /// The file exceeds the configured size ceiling
    #[error("Dataset {name} is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { name: String, size: u64, limit: u64 },

    /// A data row has more cells than the header declares
    #[error("Dataset {name} is malformed at line {line}: expected {expected} fields, saw {found}")]
    Malformed {
        name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// I/O failure or content that is not valid UTF-8
    #[error("Dataset {name} could not be read: {reason}")]
    Unreadable { name: String, reason: String },
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "TABSERVE_DATASET_NOT_FOUND",
            StoreError::EmptyFile(_) => "TABSERVE_DATASET_EMPTY",
            StoreError::TooLarge { .. } => "TABSERVE_DATASET_TOO_LARGE",
            StoreError::Malformed { .. } => "TABSERVE_DATASET_MALFORMED",
            StoreError::Unreadable { .. } => "TABSERVE_DATASET_UNREADABLE",
        }
    }

    pub(crate) fn unreadable(name: &str, reason: impl ToString) -> Self {
        StoreError::Unreadable {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
