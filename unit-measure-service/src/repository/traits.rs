//! Record store trait definition
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) so implementations can
//! write plain `async fn` bodies while the returned futures stay `Send` for
//! use inside axum handlers.

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::{Page, Pagination};
use crate::models::{UnitMeasure, UnitMeasureName};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Store for unit of measure records
///
/// Every call is one scoped session against the backing store: the session
/// is opened, used for a single logical operation, committed when the
/// operation mutates, and released on every exit path.
///
/// # Example
///
/// ```rust,ignore
/// let created = repo.create(&UnitMeasureName::parse("kg")?).await?;
/// let fetched = repo.get(created.id).await?;
/// assert_eq!(fetched.name, "kg");
/// ```
pub trait UnitMeasureRepository: Send + Sync + 'static {
    /// List records ordered by id ascending within the given window
    ///
    /// The page total is the unfiltered number of records.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Page<UnitMeasure>>> + Send;

    /// Fetch a record by id
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    fn get(&self, id: i64) -> impl Future<Output = RepositoryResult<UnitMeasure>> + Send;

    /// Create a record with a store-generated id
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if another record has the same name.
    fn create(
        &self,
        name: &UnitMeasureName,
    ) -> impl Future<Output = RepositoryResult<UnitMeasure>> + Send;

    /// Rename an existing record
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id, `AlreadyExists` if another
    /// record already uses the name.
    fn update(
        &self,
        id: i64,
        name: &UnitMeasureName,
    ) -> impl Future<Output = RepositoryResult<UnitMeasure>> + Send;

    /// Delete a record
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    fn delete(&self, id: i64) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Check that the store is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
