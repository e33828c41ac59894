//! # unit-measure-service
//!
//! HTTP CRUD service for units of measure (kilogram, litre, piece...) backed
//! by PostgreSQL.
//!
//! ## Features
//!
//! - **Envelope responses**: every endpoint answers `{status, code, message, error, data}`
//! - **Paginated listing**: configurable row-offset or page-number convention
//! - **Layered configuration**: defaults, TOML files, `UMS_*` and legacy `DB_*` environment
//! - **Middleware stack**: request ids, panic recovery, body limits, timeouts, CORS
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use unit_measure_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!
//!     let state = AppState::new(config.clone(), PgUnitMeasureRepository::new(pool));
//!
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod server;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, OffsetConvention, PaginationConfig};
    pub use crate::database::{create_pool, run_migrations};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{router, ApiError, ListQuery, ResponseEnvelope};
    pub use crate::models::{UnitMeasure, UnitMeasureName};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        Page, Pagination, PgUnitMeasureRepository, RepositoryError, UnitMeasureRepository,
    };
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
