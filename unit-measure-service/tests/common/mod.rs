#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use unit_measure_service::config::Config;
use unit_measure_service::handlers::router;
use unit_measure_service::models::{UnitMeasure, UnitMeasureName};
use unit_measure_service::repository::{
    Page, Pagination, RepositoryError, RepositoryErrorKind, RepositoryOperation,
    RepositoryResult, UnitMeasureRepository,
};
use unit_measure_service::state::AppState;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, String>,
    next_id: i64,
}

/// In-memory store with the same uniqueness and id rules as the table
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    table: Arc<Mutex<Table>>,
    broken: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail as if the database were gone
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self, op: RepositoryOperation) -> RepositoryResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(RepositoryError::new(
                op,
                RepositoryErrorKind::ConnectionFailed,
                "connection refused",
            ));
        }
        Ok(())
    }

    fn table(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().unwrap()
    }
}

impl UnitMeasureRepository for MemoryRepository {
    async fn list(&self, pagination: Pagination) -> RepositoryResult<Page<UnitMeasure>> {
        self.check(RepositoryOperation::List)?;
        let table = self.table();
        let records = table
            .rows
            .iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .map(|(id, name)| UnitMeasure {
                id: *id,
                name: name.clone(),
            })
            .collect();
        Ok(Page::new(records, table.rows.len() as u64))
    }

    async fn get(&self, id: i64) -> RepositoryResult<UnitMeasure> {
        self.check(RepositoryOperation::Get)?;
        self.table()
            .rows
            .get(&id)
            .map(|name| UnitMeasure {
                id,
                name: name.clone(),
            })
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Get, id))
    }

    async fn create(&self, name: &UnitMeasureName) -> RepositoryResult<UnitMeasure> {
        let op = RepositoryOperation::Create;
        self.check(op)?;
        let mut table = self.table();
        if table.rows.values().any(|n| n == name.as_str()) {
            return Err(RepositoryError::already_exists(op, name.as_str()));
        }
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(id, name.as_str().to_string());
        Ok(UnitMeasure {
            id,
            name: name.as_str().to_string(),
        })
    }

    async fn update(&self, id: i64, name: &UnitMeasureName) -> RepositoryResult<UnitMeasure> {
        let op = RepositoryOperation::Update;
        self.check(op)?;
        let mut table = self.table();
        if !table.rows.contains_key(&id) {
            return Err(RepositoryError::not_found(op, id));
        }
        if table
            .rows
            .iter()
            .any(|(other, n)| *other != id && n == name.as_str())
        {
            return Err(RepositoryError::already_exists(op, name.as_str()).with_entity_id(id));
        }
        table.rows.insert(id, name.as_str().to_string());
        Ok(UnitMeasure {
            id,
            name: name.as_str().to_string(),
        })
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let op = RepositoryOperation::Delete;
        self.check(op)?;
        match self.table().rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::not_found(op, id)),
        }
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.check(RepositoryOperation::Ping)
    }
}

pub fn app_with(config: Config, repository: MemoryRepository) -> Router {
    router(AppState::new(config, repository))
}

pub fn app() -> (Router, MemoryRepository) {
    let repository = MemoryRepository::new();
    (app_with(Config::default(), repository.clone()), repository)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "non-JSON response: status={} body={}",
            status,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, json)
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}
