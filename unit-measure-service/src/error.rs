//! Service-level error types
//!
//! These cover failures while the service starts and runs: configuration,
//! database connectivity and migrations, and I/O. Request-level failures are
//! expressed with [`crate::handlers::ApiError`] instead.

use std::fmt;
use thiserror::Error;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Database operation being performed when a startup error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseOperation {
    /// Establishing a database connection
    Connect,
    /// Running database migrations
    Migration,
}

impl fmt::Display for DatabaseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::Migration => write!(f, "migration"),
        }
    }
}

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Database error with the operation that failed
    #[error("Database {operation} error: {message}")]
    Database {
        /// Operation being performed
        operation: DatabaseOperation,
        /// Human-readable message (credentials redacted)
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a database error for the given operation
    pub fn database(operation: DatabaseOperation, message: impl Into<String>) -> Self {
        Self::Database {
            operation,
            message: message.into(),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::database(DatabaseOperation::Migration, err.to_string())
    }
}
