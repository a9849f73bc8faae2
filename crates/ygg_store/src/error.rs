//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a store collaborator may report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// The store has been shut down.
    #[error("store is closed")]
    Closed,
}
