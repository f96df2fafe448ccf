//! # Todo Handler Tests
//!
//! Handler tests for the `/todos` endpoints, driven through the full router
//! so the auth middleware runs exactly as in production.

mod integration;
mod update;

pub(super) use crate::test_utils::{register, send, test_app};
pub(super) use axum::http::StatusCode;
pub(super) use axum::Router;
pub(super) use serde_json::{json, Value};

/// Create a todo as `token` and return its id
pub(super) async fn create(app: &Router, token: &str, title: &str) -> String {
    let (status, body) = send(app, "POST", "/todos", Some(token), Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");

    body["data"]["id"].as_str().unwrap().to_string()
}

/// Titles of the first page of `token`'s todos
pub(super) async fn titles(app: &Router, token: &str, uri: &str) -> Vec<String> {
    let (status, body) = send(app, "GET", uri, Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "list failed: {body}");

    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect()
}

pub(super) fn item_by_id<'a>(list: &'a Value, id: &str) -> Option<&'a Value> {
    list["data"]
        .as_array()?
        .iter()
        .find(|item| item["id"] == id)
}
