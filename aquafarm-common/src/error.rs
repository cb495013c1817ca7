//! Shared error type for the aquafarm crates

use thiserror::Error;

/// Common result type for aquafarm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the shared config and database layers
///
/// HTTP-level conditions (bad parameter, missing entity) are represented by
/// the report service's own response error, not here.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
