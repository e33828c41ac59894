//! Extractors that reject with an envelope
//!
//! Thin wrappers over axum's `Json`, `Path` and `Query` whose rejection is
//! an [`ApiError`], so malformed input gets the same 400 envelope as any
//! other validation failure. Rejections are tagged with the endpoint the
//! request method selects.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiOperation};

/// JSON body
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = ApiOperation::from_method(req.method());
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::from(rejection).with_operation(operation))?;
        Ok(Self(value))
    }
}

/// Path parameters
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let operation = ApiOperation::from_method(&parts.method);
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::from(rejection).with_operation(operation))?;
        Ok(Self(value))
    }
}

/// Query string
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Method};

    use crate::handlers::ApiErrorKind;

    #[tokio::test]
    async fn test_path_rejection_tagged_with_method() {
        for (method, expected) in [
            (Method::GET, ApiOperation::Show),
            (Method::PUT, ApiOperation::Update),
            (Method::DELETE, ApiOperation::Destroy),
        ] {
            let (mut parts, _) = axum::http::Request::builder()
                .method(method)
                .uri("/unit-measure/abc")
                .body(())
                .unwrap()
                .into_parts();

            // No route matched, so the path parameters are missing
            let err = ValidPath::<i64>::from_request_parts(&mut parts, &())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ApiErrorKind::ValidationFailed);
            assert_eq!(err.operation, expected);
        }
    }

    #[tokio::test]
    async fn test_json_rejection_tagged_with_method() {
        let request = axum::http::Request::builder()
            .method(Method::PUT)
            .uri("/unit-measure/1")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let err = ValidJson::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::ValidationFailed);
        assert_eq!(err.operation, ApiOperation::Update);
    }
}
