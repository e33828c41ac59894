//! API error types for handler operations
//!
//! Every failure leaves the service as a [`ResponseEnvelope`]. Caller
//! mistakes (unknown id, duplicate name, malformed input) are reported with
//! status 400; anything else is a 500 whose detail stays hidden unless the
//! service runs with `debug` enabled.
//!
//! # Example
//!
//! ```rust
//! use unit_measure_service::handlers::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::not_found(ApiOperation::Show, 7);
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some(7));
//! ```

use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use super::{
    messages::{Message, RESOURCE},
    response::ResponseEnvelope,
};
use crate::{
    models::NameError,
    repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation},
};

/// Endpoint being served when the error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Paginated listing
    List,
    /// Fetch by id
    Show,
    /// Create
    Store,
    /// Rename
    Update,
    /// Delete
    Destroy,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Show => write!(f, "show"),
            Self::Store => write!(f, "store"),
            Self::Update => write!(f, "update"),
            Self::Destroy => write!(f, "destroy"),
        }
    }
}

impl ApiOperation {
    /// Endpoint served by a request to `/unit-measure` with this method
    #[must_use]
    pub fn from_method(method: &Method) -> Self {
        match *method {
            Method::POST => Self::Store,
            Method::PUT | Method::PATCH => Self::Update,
            Method::DELETE => Self::Destroy,
            _ => Self::Show,
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No record with the requested id
    NotFound,
    /// A record with the requested name exists
    AlreadyExists,
    /// Body, path or query could not be parsed or validated
    ValidationFailed,
    /// Unexpected failure
    InternalError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

impl ApiErrorKind {
    /// HTTP status for this kind
    ///
    /// Domain errors share 400; clients tell them apart by the `error` field.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::AlreadyExists | Self::ValidationFailed => {
                StatusCode::BAD_REQUEST
            }
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code, e.g. `NOT_FOUND`
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The endpoint being served
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Detail for logs, and for clients on validation errors
    pub message: String,
    /// Id of the record involved
    pub entity_id: Option<i64>,
    /// Whether internal details may be shown to the client
    pub expose_detail: bool,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
            expose_detail: false,
        }
    }

    /// No record with `id`
    pub fn not_found(operation: ApiOperation, id: i64) -> Self {
        Self::new(operation, ApiErrorKind::NotFound, "Record not found").with_entity_id(id)
    }

    /// Duplicate name
    pub fn already_exists(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::AlreadyExists, message)
    }

    /// Malformed or invalid input
    pub fn validation_failed(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::ValidationFailed, message)
    }

    /// Unexpected failure
    pub fn internal(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::InternalError, message)
    }

    /// Attach the id of the record involved
    #[must_use]
    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Set the endpoint being served
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Allow internal details in the response body
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.expose_detail = debug;
        self
    }

    /// Build the envelope returned to the client
    pub fn to_envelope(&self) -> ResponseEnvelope {
        let resource = RESOURCE;
        let message = match self.kind {
            ApiErrorKind::NotFound => match self.entity_id {
                Some(id) => Message::RecordNotFound { resource, id }.to_string(),
                None => Message::InvalidRequest { resource }.to_string(),
            },
            ApiErrorKind::AlreadyExists => Message::RecordAlreadyExists { resource }.to_string(),
            ApiErrorKind::ValidationFailed => Message::InvalidRequest { resource }.to_string(),
            ApiErrorKind::InternalError => Message::InternalError.to_string(),
        };

        let error = match self.kind {
            ApiErrorKind::ValidationFailed => self.message.clone(),
            ApiErrorKind::InternalError if self.expose_detail => self.message.clone(),
            kind => kind.error_code(),
        };

        ResponseEnvelope::build(message, None, self.kind.status_code(), Some(error))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.entity_id {
            write!(f, " [id: {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.kind {
            ApiErrorKind::InternalError => tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_id = ?self.entity_id,
                "API error: {}", self.message
            ),
            _ => tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                entity_id = ?self.entity_id,
                "API error: {}", self.message
            ),
        }

        self.to_envelope().into_response()
    }
}

fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::List | RepositoryOperation::Ping => ApiOperation::List,
        RepositoryOperation::Get => ApiOperation::Show,
        RepositoryOperation::Create => ApiOperation::Store,
        RepositoryOperation::Update => ApiOperation::Update,
        RepositoryOperation::Delete => ApiOperation::Destroy,
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let kind = match err.kind {
            RepositoryErrorKind::NotFound => ApiErrorKind::NotFound,
            RepositoryErrorKind::AlreadyExists => ApiErrorKind::AlreadyExists,
            RepositoryErrorKind::ValidationFailed => ApiErrorKind::ValidationFailed,
            RepositoryErrorKind::ConnectionFailed
            | RepositoryErrorKind::Timeout
            | RepositoryErrorKind::DatabaseError => ApiErrorKind::InternalError,
        };

        Self {
            operation: repository_operation_to_api_operation(err.operation),
            kind,
            message: err.message,
            entity_id: err.entity_id,
            expose_detail: false,
        }
    }
}

impl From<NameError> for ApiError {
    fn from(err: NameError) -> Self {
        Self::validation_failed(ApiOperation::Store, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation_failed(ApiOperation::Store, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation_failed(ApiOperation::Show, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation_failed(ApiOperation::List, rejection.body_text())
    }
}
