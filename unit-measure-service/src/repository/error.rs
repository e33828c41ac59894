//! Repository error types
//!
//! Structured errors for record store operations. Database driver errors are
//! classified on conversion so that callers never see a raw `sqlx::Error`.
//!
//! # Example
//!
//! ```rust
//! use unit_measure_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found(RepositoryOperation::Get, 7);
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some(7));
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Listing a page of records
    List,
    /// Fetching a single record by id
    Get,
    /// Creating a record
    Create,
    /// Renaming a record
    Update,
    /// Deleting a record
    Delete,
    /// Probing the store
    Ping,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Ping => write!(f, "ping"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Record was not found
    NotFound,
    /// A record with the same name already exists
    AlreadyExists,
    /// Input rejected before or by the store
    ValidationFailed,
    /// Failed to reach the database
    ConnectionFailed,
    /// Pool acquire or query timed out
    Timeout,
    /// Any other database failure
    DatabaseError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The id of the record involved, when known
    pub entity_id: Option<i64>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
        }
    }

    /// Create a "not found" error for the given id
    pub fn not_found(operation: RepositoryOperation, id: i64) -> Self {
        Self {
            operation,
            kind: RepositoryErrorKind::NotFound,
            message: "Record not found".to_string(),
            entity_id: Some(id),
        }
    }

    /// Create an "already exists" error for a duplicate name
    pub fn already_exists(operation: RepositoryOperation, name: &str) -> Self {
        Self::new(
            operation,
            RepositoryErrorKind::AlreadyExists,
            format!("A record named '{}' already exists", name),
        )
    }

    /// Create a validation failed error
    pub fn validation_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ValidationFailed, message)
    }

    /// Create a database error
    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    /// Attach the id of the record involved
    #[must_use]
    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Classify a driver error raised during `operation`
    ///
    /// Unique violations become `AlreadyExists`, check/not-null violations
    /// become `ValidationFailed`, pool and I/O failures are reported as
    /// connection problems. Everything else is a `DatabaseError`.
    pub fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        match err {
            E::RowNotFound => Self::new(
                operation,
                RepositoryErrorKind::NotFound,
                "Record not found",
            ),
            E::Database(ref db) if db.is_unique_violation() => Self::new(
                operation,
                RepositoryErrorKind::AlreadyExists,
                db.message().to_string(),
            ),
            E::Database(ref db) if db.is_check_violation() => Self::new(
                operation,
                RepositoryErrorKind::ValidationFailed,
                db.message().to_string(),
            ),
            E::PoolTimedOut => Self::new(
                operation,
                RepositoryErrorKind::Timeout,
                "Connection pool timed out",
            ),
            E::PoolClosed => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                "Connection pool is closed",
            ),
            E::Io(e) => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                e.to_string(),
            ),
            E::Tls(e) => Self::new(
                operation,
                RepositoryErrorKind::ConnectionFailed,
                format!("TLS error: {}", e),
            ),
            other => Self::database_error(operation, other.to_string()),
        }
    }

    /// Whether this error is a caller mistake rather than a store failure
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::NotFound
                | RepositoryErrorKind::AlreadyExists
                | RepositoryErrorKind::ValidationFailed
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.entity_id {
            write!(f, " [id: {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(RepositoryOperation::List.to_string(), "list");
        assert_eq!(RepositoryOperation::Get.to_string(), "get");
        assert_eq!(RepositoryOperation::Create.to_string(), "create");
        assert_eq!(RepositoryOperation::Update.to_string(), "update");
        assert_eq!(RepositoryOperation::Delete.to_string(), "delete");
        assert_eq!(RepositoryOperation::Ping.to_string(), "ping");
    }

    #[test]
    fn test_not_found_display_includes_id() {
        let error = RepositoryError::not_found(RepositoryOperation::Update, 42);
        assert_eq!(
            error.to_string(),
            "Repository not_found error during update: Record not found [id: 42]"
        );
        assert!(error.is_domain_error());
    }

    #[test]
    fn test_already_exists() {
        let error = RepositoryError::already_exists(RepositoryOperation::Create, "kg");
        assert_eq!(error.kind, RepositoryErrorKind::AlreadyExists);
        assert!(error.message.contains("'kg'"));
    }

    #[test]
    fn test_pool_timeout_is_not_domain_error() {
        let error = RepositoryError::from_sqlx(RepositoryOperation::List, sqlx::Error::PoolTimedOut);
        assert_eq!(error.kind, RepositoryErrorKind::Timeout);
        assert!(!error.is_domain_error());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = RepositoryError::from_sqlx(RepositoryOperation::Get, sqlx::Error::RowNotFound);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
    }

    #[test]
    fn test_unclassified_error_is_database_error() {
        let error = RepositoryError::from_sqlx(
            RepositoryOperation::Create,
            sqlx::Error::Protocol("unexpected message".to_string()),
        );
        assert_eq!(error.kind, RepositoryErrorKind::DatabaseError);
        assert_eq!(error.with_entity_id(3).entity_id, Some(3));
    }
}
