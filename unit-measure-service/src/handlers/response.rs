//! Response envelope shared by every endpoint
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use unit_measure_service::handlers::ResponseEnvelope;
//!
//! let envelope = ResponseEnvelope::build("done", None, StatusCode::OK, None);
//! assert_eq!(envelope.status, "OK");
//! assert_eq!(envelope.code, 200);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Textual label for a status code
///
/// The known set is closed; any other code is reported as `"Error"`.
pub fn status_label(code: StatusCode) -> &'static str {
    match code {
        StatusCode::OK => "OK",
        StatusCode::BAD_REQUEST => "BadRequest",
        StatusCode::INTERNAL_SERVER_ERROR => "InternalServerError",
        _ => "Error",
    }
}

/// Uniform JSON envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Textual status label
    pub status: String,
    /// Numeric HTTP status, also used as the response status
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Error detail, `null` on success
    pub error: Option<String>,
    /// Payload: a record, a list of records, or `null`
    pub data: Option<Value>,
    /// Unfiltered record count, only on paginated listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,
}

impl ResponseEnvelope {
    /// Build an envelope for any status
    pub fn build(
        message: impl Into<String>,
        data: Option<Value>,
        status: StatusCode,
        error: Option<String>,
    ) -> Self {
        Self {
            status: status_label(status).to_string(),
            code: status.as_u16(),
            message: message.into(),
            error,
            data,
            total_records: None,
        }
    }

    /// Build a successful paginated listing
    pub fn build_paginated(message: impl Into<String>, data: Value, total_records: u64) -> Self {
        Self {
            total_records: Some(total_records),
            ..Self::build(message, Some(data), StatusCode::OK, None)
        }
    }

    /// Successful envelope with a payload
    pub fn ok(message: impl Into<String>, data: Option<Value>) -> Self {
        Self::build(message, data, StatusCode::OK, None)
    }

    /// HTTP status carried by this envelope
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(StatusCode::OK), "OK");
        assert_eq!(status_label(StatusCode::BAD_REQUEST), "BadRequest");
        assert_eq!(
            status_label(StatusCode::INTERNAL_SERVER_ERROR),
            "InternalServerError"
        );
        assert_eq!(status_label(StatusCode::NOT_FOUND), "Error");
        assert_eq!(status_label(StatusCode::SERVICE_UNAVAILABLE), "Error");
    }

    #[test]
    fn test_build_serializes_nulls() {
        let envelope = ResponseEnvelope::build(
            "missing",
            None,
            StatusCode::BAD_REQUEST,
            Some("NOT_FOUND".to_string()),
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "BadRequest",
                "code": 400,
                "message": "missing",
                "error": "NOT_FOUND",
                "data": null,
            })
        );
    }

    #[test]
    fn test_build_paginated() {
        let envelope = ResponseEnvelope::build_paginated("found", json!([{"id": 1, "name": "kg"}]), 12);
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.status, "OK");
        assert_eq!(envelope.total_records, Some(12));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["total_records"], 12);
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_status_code_roundtrip() {
        let envelope = ResponseEnvelope::build("x", None, StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(envelope.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
