//! Unit measure endpoints
//!
//! Each handler validates its input, makes exactly one repository call and
//! wraps the outcome in a [`ResponseEnvelope`].

use axum::extract::State;
use tracing::instrument;

use super::{
    error::{ApiError, ApiOperation},
    extract::{ValidJson, ValidPath, ValidQuery},
    messages::{Message, RESOURCE},
    query::ListQuery,
    response::ResponseEnvelope,
    serializer::{serialize, serialize_many},
};
use crate::{
    models::UnitMeasurePayload,
    repository::{RepositoryError, UnitMeasureRepository},
    state::AppState,
};

/// Handler result: an envelope either way
pub type ApiResult = Result<ResponseEnvelope, ApiError>;

fn reject<R: UnitMeasureRepository>(
    state: &AppState<R>,
    operation: ApiOperation,
) -> impl FnOnce(RepositoryError) -> ApiError {
    let debug = state.debug();
    move |err| ApiError::from(err).with_operation(operation).with_debug(debug)
}

/// `GET /unit-measures`
#[instrument(skip(state))]
pub async fn list<R: UnitMeasureRepository>(
    State(state): State<AppState<R>>,
    ValidQuery(query): ValidQuery<ListQuery>,
) -> ApiResult {
    let window = query.resolve(&state.config().pagination)?;

    let page = state
        .repository()
        .list(window)
        .await
        .map_err(reject(&state, ApiOperation::List))?;

    tracing::debug!(returned = page.records.len(), total = page.total, "Listed unit measures");

    Ok(ResponseEnvelope::build_paginated(
        Message::RecordFound { resource: RESOURCE }.to_string(),
        serialize_many(&page.records),
        page.total,
    ))
}

/// `GET /unit-measure/{id}`
#[instrument(skip(state))]
pub async fn show<R: UnitMeasureRepository>(
    State(state): State<AppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> ApiResult {
    let record = state
        .repository()
        .get(id)
        .await
        .map_err(reject(&state, ApiOperation::Show))?;

    Ok(ResponseEnvelope::ok(
        Message::RecordFound { resource: RESOURCE }.to_string(),
        Some(serialize(&record)),
    ))
}

/// `POST /unit-measure`
#[instrument(skip(state, payload))]
pub async fn store<R: UnitMeasureRepository>(
    State(state): State<AppState<R>>,
    ValidJson(payload): ValidJson<UnitMeasurePayload>,
) -> ApiResult {
    let name = payload.validate()?;

    let record = state
        .repository()
        .create(&name)
        .await
        .map_err(reject(&state, ApiOperation::Store))?;

    tracing::info!(id = record.id, name = %record.name, "Unit measure created");

    Ok(ResponseEnvelope::ok(
        Message::RecordCreated { resource: RESOURCE }.to_string(),
        Some(serialize(&record)),
    ))
}

/// `PUT /unit-measure/{id}`
#[instrument(skip(state, payload))]
pub async fn update<R: UnitMeasureRepository>(
    State(state): State<AppState<R>>,
    ValidPath(id): ValidPath<i64>,
    ValidJson(payload): ValidJson<UnitMeasurePayload>,
) -> ApiResult {
    let name = payload
        .validate()
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;

    let record = state
        .repository()
        .update(id, &name)
        .await
        .map_err(reject(&state, ApiOperation::Update))?;

    Ok(ResponseEnvelope::ok(
        Message::RecordUpdated {
            resource: RESOURCE,
            id,
        }
        .to_string(),
        Some(serialize(&record)),
    ))
}

/// `DELETE /unit-measure/{id}`
#[instrument(skip(state))]
pub async fn destroy<R: UnitMeasureRepository>(
    State(state): State<AppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> ApiResult {
    state
        .repository()
        .delete(id)
        .await
        .map_err(reject(&state, ApiOperation::Destroy))?;

    tracing::info!(id, "Unit measure deleted");

    Ok(ResponseEnvelope::ok(
        Message::RecordDeleted {
            resource: RESOURCE,
            id,
        }
        .to_string(),
        None,
    ))
}
