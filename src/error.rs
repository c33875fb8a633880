//! Error types for the portfolio persistence layer.
//!
//! Store failures are propagated to the caller unchanged; this layer
//! performs no retries and no local recovery.

use thiserror::Error;

/// Unified error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
