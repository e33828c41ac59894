//! Request tracking and recovery middleware
//!
//! Request ids are generated (or kept, when the caller sends one) in the
//! `x-request-id` header and echoed on the response. Credential-bearing
//! headers are marked sensitive so `TraceLayer` does not log them.

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    BoxError,
};
use http::{header, HeaderName, HeaderValue, Request, StatusCode};
use tower::timeout::error::Elapsed;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};
use uuid::Uuid;

use crate::handlers::{Message, ResponseEnvelope};

/// Headers masked in logs
pub const SENSITIVE_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    header::COOKIE,
    header::SET_COOKIE,
    HeaderName::from_static("x-api-key"),
];

/// Generates UUID v4 request ids
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        let header_value = HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Create a request ID layer
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidRequestId> {
    SetRequestIdLayer::x_request_id(MakeUuidRequestId)
}

/// Create a request ID propagation layer
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(SENSITIVE_HEADERS)
}

/// Build the CORS layer for a configured mode
///
/// `permissive` allows any origin; `restrictive` and `disabled` deny
/// cross-origin requests. Unknown modes fall back to permissive.
pub fn cors_layer(mode: &str) -> CorsLayer {
    match mode {
        "permissive" => {
            tracing::debug!("Enabling permissive CORS");
            CorsLayer::permissive()
        }
        "restrictive" => {
            tracing::debug!("Enabling restrictive CORS (default deny)");
            CorsLayer::new()
        }
        "disabled" => {
            tracing::debug!("CORS disabled (using restrictive)");
            CorsLayer::new()
        }
        other => {
            tracing::warn!("Unknown CORS mode: {}, defaulting to permissive", other);
            CorsLayer::permissive()
        }
    }
}

/// Render a handler panic as a 500 envelope
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    ResponseEnvelope::build(
        Message::InternalError.to_string(),
        None,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some("INTERNAL_ERROR".to_string()),
    )
    .into_response()
}

/// Turn errors from the timeout layer into an envelope
///
/// Used with `HandleErrorLayer`; an elapsed deadline answers 408.
pub async fn timeout_response(err: BoxError) -> Response {
    let (status, code) = if err.is::<Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
    };

    tracing::error!(error = %err, status = status.as_u16(), "Request did not complete");

    ResponseEnvelope::build(
        Message::InternalError.to_string(),
        None,
        status,
        Some(code.to_string()),
    )
    .into_response()
}
