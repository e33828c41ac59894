//! PostgreSQL record store

use sqlx::{FromRow, PgPool};
use tracing::instrument;

use super::error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use super::pagination::{Page, Pagination};
use super::traits::{RepositoryResult, UnitMeasureRepository};
use crate::models::{UnitMeasure, UnitMeasureName};

/// Row shape of the `unit_measures` table
#[derive(Debug, Clone, FromRow)]
struct UnitMeasureRow {
    id: i64,
    name: String,
}

impl From<UnitMeasureRow> for UnitMeasure {
    fn from(row: UnitMeasureRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// [`UnitMeasureRepository`] backed by a PostgreSQL pool
///
/// Reads run on one pooled connection; writes run inside a transaction that
/// is committed on success and rolled back when dropped early.
#[derive(Debug, Clone)]
pub struct PgUnitMeasureRepository {
    pool: PgPool,
}

impl PgUnitMeasureRepository {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl UnitMeasureRepository for PgUnitMeasureRepository {
    #[instrument(skip(self), err(Display))]
    async fn list(&self, pagination: Pagination) -> RepositoryResult<Page<UnitMeasure>> {
        let op = RepositoryOperation::List;
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        let rows: Vec<UnitMeasureRow> = sqlx::query_as(
            "SELECT id, name FROM unit_measures ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(to_i64(pagination.limit))
        .bind(to_i64(pagination.offset))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM unit_measures")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        Ok(Page::new(
            rows.into_iter().map(UnitMeasure::from).collect(),
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    #[instrument(skip(self), err(Display))]
    async fn get(&self, id: i64) -> RepositoryResult<UnitMeasure> {
        let op = RepositoryOperation::Get;
        let row: Option<UnitMeasureRow> =
            sqlx::query_as("SELECT id, name FROM unit_measures WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::from_sqlx(op, e).with_entity_id(id))?;

        row.map(UnitMeasure::from)
            .ok_or_else(|| RepositoryError::not_found(op, id))
    }

    #[instrument(skip(self, name), fields(name = %name), err(Display))]
    async fn create(&self, name: &UnitMeasureName) -> RepositoryResult<UnitMeasure> {
        let op = RepositoryOperation::Create;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        let row: UnitMeasureRow =
            sqlx::query_as("INSERT INTO unit_measures (name) VALUES ($1) RETURNING id, name")
                .bind(name.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| duplicate_aware(op, name, e))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        Ok(row.into())
    }

    #[instrument(skip(self, name), fields(name = %name), err(Display))]
    async fn update(&self, id: i64, name: &UnitMeasureName) -> RepositoryResult<UnitMeasure> {
        let op = RepositoryOperation::Update;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        let row: Option<UnitMeasureRow> = sqlx::query_as(
            "UPDATE unit_measures SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| duplicate_aware(op, name, e).with_entity_id(id))?;

        let Some(row) = row else {
            return Err(RepositoryError::not_found(op, id));
        };

        tx.commit()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e).with_entity_id(id))?;

        Ok(row.into())
    }

    #[instrument(skip(self), err(Display))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let op = RepositoryOperation::Delete;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e))?;

        let result = sqlx::query("DELETE FROM unit_measures WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e).with_entity_id(id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(op, id));
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::from_sqlx(op, e).with_entity_id(id))?;

        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_sqlx(RepositoryOperation::Ping, e))?;
        Ok(())
    }
}

/// Classify a write error, naming the duplicate on unique violations
fn duplicate_aware(
    op: RepositoryOperation,
    name: &UnitMeasureName,
    err: sqlx::Error,
) -> RepositoryError {
    let error = RepositoryError::from_sqlx(op, err);
    if error.kind == RepositoryErrorKind::AlreadyExists {
        RepositoryError::already_exists(op, name.as_str())
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_record() {
        let row = UnitMeasureRow {
            id: 3,
            name: "kg".to_string(),
        };
        assert_eq!(
            UnitMeasure::from(row),
            UnitMeasure {
                id: 3,
                name: "kg".to_string()
            }
        );
    }

    #[test]
    fn test_to_i64_saturates() {
        assert_eq!(to_i64(10), 10);
        assert_eq!(to_i64(u64::MAX), i64::MAX);
    }
}
