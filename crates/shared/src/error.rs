//! Error types for the QuotaPay store

use thiserror::Error;

/// Store-level errors
///
/// Read accessors degrade to empty results instead of raising `Unavailable`;
/// writes with financial or quota effect surface it explicitly.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Store unavailable: no database connection configured")]
    Unavailable,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
