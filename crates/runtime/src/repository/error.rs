//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("{table} row {id} does not exist")]
    MissingRow { table: &'static str, id: u64 },

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
