//! Record store for unit of measure records
//!
//! - [`UnitMeasureRepository`]: the store contract used by the handlers
//! - [`PgUnitMeasureRepository`]: PostgreSQL implementation (sqlx)
//! - [`RepositoryError`]: structured errors classified from driver errors
//! - [`Pagination`] / [`Page`]: row windows and page results for listings

mod error;
mod pagination;
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use pagination::{Page, Pagination};
pub use postgres::PgUnitMeasureRepository;
pub use traits::{RepositoryResult, UnitMeasureRepository};
