//! Query executor error types
//!
//! Error codes:
//! - TABSERVE_NOT_FOUND
//! - TABSERVE_EMPTY_FILE
//! - TABSERVE_INVALID_EXPRESSION
//! - TABSERVE_INVALID_SORT_KEY
//! - TABSERVE_DATASET_TOO_LARGE / _MALFORMED / _UNREADABLE (from the store)
//!
//! None of these is fatal: each is reported to the caller and the
//! service keeps running.

use thiserror::Error;

use crate::dataset::StoreError;
use crate::expr::ExprError;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutorError {
    /// Requested dataset does not exist
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// Dataset has no data rows
    #[error("Dataset is empty: {0}")]
    EmptyFile(String),

    /// Filter number `index` (zero based) failed to compile
    #[error("Invalid filter expression #{index} '{expression}': {reason}")]
    InvalidExpression {
        index: usize,
        expression: String,
        #[source]
        reason: ExprError,
    },

    /// Sort key names no column of the dataset
    #[error("Invalid column name for sorting: {0}")]
    InvalidSortKey(String),

    /// Any other dataset load failure
    #[error(transparent)]
    Dataset(StoreError),
}

impl ExecutorError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::NotFound(_) => "TABSERVE_NOT_FOUND",
            ExecutorError::EmptyFile(_) => "TABSERVE_EMPTY_FILE",
            ExecutorError::InvalidExpression { .. } => "TABSERVE_INVALID_EXPRESSION",
            ExecutorError::InvalidSortKey(_) => "TABSERVE_INVALID_SORT_KEY",
            ExecutorError::Dataset(inner) => inner.code(),
        }
    }

    /// Returns true when the caller's request, not the server, is at fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ExecutorError::Dataset(StoreError::Unreadable { .. }))
    }
}

impl From<StoreError> for ExecutorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => ExecutorError::NotFound(name),
            StoreError::EmptyFile(name) => ExecutorError::EmptyFile(name),
            other => ExecutorError::Dataset(other),
        }
    }
}
