//! Repository tests against a live PostgreSQL
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use sqlx::PgPool;
use unit_measure_service::models::UnitMeasureName;
use unit_measure_service::repository::{
    Pagination, PgUnitMeasureRepository, RepositoryErrorKind, UnitMeasureRepository,
};

fn name(raw: &str) -> UnitMeasureName {
    UnitMeasureName::parse(raw).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_then_get(pool: PgPool) {
    let repo = PgUnitMeasureRepository::new(pool);

    let created = repo.create(&name("kg")).await.unwrap();
    let fetched = repo.get(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "kg");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_create_is_already_exists(pool: PgPool) {
    let repo = PgUnitMeasureRepository::new(pool);

    repo.create(&name("litre")).await.unwrap();
    let err = repo.create(&name("litre")).await.unwrap_err();

    assert_eq!(err.kind, RepositoryErrorKind::AlreadyExists);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_and_delete_missing_are_not_found(pool: PgPool) {
    let repo = PgUnitMeasureRepository::new(pool);

    let err = repo.update(404, &name("x")).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);
    assert_eq!(err.entity_id, Some(404));

    let err = repo.delete(404).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_to_taken_name_is_already_exists(pool: PgPool) {
    let repo = PgUnitMeasureRepository::new(pool);

    repo.create(&name("kg")).await.unwrap();
    let g = repo.create(&name("g")).await.unwrap();

    let err = repo.update(g.id, &name("kg")).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::AlreadyExists);

    let renamed = repo.update(g.id, &name("gram")).await.unwrap();
    assert_eq!(renamed.name, "gram");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn delete_then_get_is_not_found(pool: PgPool) {
    let repo = PgUnitMeasureRepository::new(pool);

    let created = repo.create(&name("piece")).await.unwrap();
    repo.delete(created.id).await.unwrap();

    let err = repo.get(created.id).await.unwrap_err();
    assert_eq!(err.kind, RepositoryErrorKind::NotFound);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_windows_and_counts(pool: PgPool) {
    let repo = PgUnitMeasureRepository::new(pool);
    for i in 0..12 {
        repo.create(&name(&format!("unit-{i}"))).await.unwrap();
    }

    let page = repo.list(Pagination::new(0, 10)).await.unwrap();
    assert_eq!(page.records.len(), 10);
    assert_eq!(page.total, 12);
    assert!(page.records.windows(2).all(|w| w[0].id < w[1].id));

    let page = repo.list(Pagination::new(10, 10)).await.unwrap();
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.total, 12);

    repo.ping().await.unwrap();
}
