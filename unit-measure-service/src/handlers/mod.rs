//! HTTP handlers for the unit measure collection
//!
//! Every endpoint answers with a [`ResponseEnvelope`]:
//!
//! ```json
//! {"status": "OK", "code": 200, "message": "...", "error": null, "data": {...}}
//! ```
//!
//! Listings add `total_records`. Failures are produced by [`ApiError`],
//! which maps repository and input errors onto the same envelope.
//!
//! # Routes
//!
//! | method | path |
//! |---|---|
//! | GET | `/unit-measures?offset=&limit=` |
//! | GET | `/unit-measure/{id}` |
//! | POST | `/unit-measure` |
//! | PUT | `/unit-measure/{id}` |
//! | DELETE | `/unit-measure/{id}` |
//!
//! plus `/`, `/health` and `/ready`.
//!
//! # Example
//!
//! ```rust,ignore
//! use unit_measure_service::prelude::*;
//!
//! let repository = PgUnitMeasureRepository::new(pool);
//! let app = handlers::router(AppState::new(config, repository));
//! ```

mod error;
mod extract;
mod messages;
mod query;
mod response;
mod serializer;
pub mod unit_measures;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{health, repository::UnitMeasureRepository, state::AppState};

// Re-export all public types
pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use extract::{ValidJson, ValidPath, ValidQuery};
pub use messages::{Message, RESOURCE};
pub use query::ListQuery;
pub use response::{status_label, ResponseEnvelope};
pub use serializer::{serialize, serialize_many};

/// Build the service router over any repository
pub fn router<R: UnitMeasureRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health::<R>))
        .route("/ready", get(health::readiness::<R>))
        .route("/unit-measures", get(unit_measures::list::<R>))
        .route("/unit-measure", post(unit_measures::store::<R>))
        .route(
            "/unit-measure/{id}",
            get(unit_measures::show::<R>)
                .put(unit_measures::update::<R>)
                .delete(unit_measures::destroy::<R>),
        )
        .with_state(state)
}
