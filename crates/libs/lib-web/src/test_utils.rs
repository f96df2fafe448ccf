//! Shared fixtures for service and handler tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::model::store::SqliteStore;
use lib_core::{Account, AccountId, Config, DynStore, Result, Store, Task, TaskForUpdate, TaskId};
use serde_json::Value;
use tower::ServiceExt;

use crate::server::{create_router, AppState};

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        database_name: "todo_api_test".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 24,
        db_timeout_secs: 5,
    }
}

/// Fresh, migrated in-memory store
pub async fn test_store() -> DynStore {
    Arc::new(
        SqliteStore::in_memory()
            .await
            .expect("Failed to create test database"),
    )
}

/// Create test app with routes
pub async fn test_app() -> Router {
    test_app_with(test_store().await, test_config())
}

/// Test app over a caller-supplied store and config
pub fn test_app_with(store: DynStore, config: Config) -> Router {
    create_router(AppState::new(store, config), &[])
}

/// Store whose task calls outlive any reasonable timeout. Account calls
/// answer at once so registration still works against it.
pub struct SlowStore;

#[async_trait]
impl Store for SlowStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
    async fn insert_account(&self, _: &Account) -> Result<()> {
        Ok(())
    }
    async fn find_account_by_username(&self, _: &str) -> Result<Option<Account>> {
        Ok(None)
    }
    async fn insert_task(&self, _: &Task) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
    async fn find_tasks(&self, _: &AccountId, _: u64, _: u64) -> Result<Vec<Task>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
    async fn update_task(&self, _: &AccountId, _: &TaskId, _: &TaskForUpdate) -> Result<u64> {
        Ok(0)
    }
    async fn delete_task(&self, _: &AccountId, _: &TaskId) -> Result<u64> {
        Ok(0)
    }
}

/// Send one request; the body comes back as JSON, as a JSON string for plain
/// text, or `Null` when empty.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

/// Send a prebuilt request (custom headers, raw bodies).
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

/// Register `username` and return its token
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/register",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");

    body["token"].as_str().unwrap().to_string()
}
