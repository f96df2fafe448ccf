//! # Todo Handlers
//!
//! Owner-scoped task endpoints. All routes sit behind
//! [`require_auth`](crate::middleware::require_auth); the caller arrives as an
//! [`Identity`] extractor and is handed to [`TaskService`] explicitly.
//!
//! | Method | Path | Body | Success |
//! |---|---|---|---|
//! | POST | `/todos` | `{title}` | `{success, data}` |
//! | GET | `/todos?page=&limit=` | | `{success, data, page, limit}` |
//! | PUT | `/todos?id=` | `{title, done}` | `{success, message}` |
//! | PUT | `/todos/status?id=` | `{done}` | `{success, message}` |
//! | DELETE | `/todos?id=` | | `{success, message}` |

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use lib_core::{Identity, Pagination, Result};
use serde::Deserialize;
use shared::{
    CreateTodoRequest, MessageResponse, TodoItem, TodoListResponse, TodoResponse,
    UpdateTodoRequest, UpdateTodoStatusRequest,
};
use tracing::instrument;

use super::{id_param, json_body, IdQuery};
use crate::services::TaskService;

/// `?page=&limit=` of the list endpoint, kept raw so bad values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<ListQuery> for Pagination {
    fn from(query: ListQuery) -> Self {
        Pagination::from_query(query.page.as_deref(), query.limit.as_deref())
    }
}

#[instrument(skip_all, fields(owner = %identity.account_id()))]
pub async fn create_todo(
    identity: Identity,
    State(tasks): State<TaskService>,
    body: std::result::Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>> {
    let req = json_body(body)?;

    let task = tasks.create(&identity, &req.title).await?;

    Ok(Json(TodoResponse {
        success: true,
        data: task.into(),
    }))
}

#[instrument(skip_all, fields(owner = %identity.account_id()))]
pub async fn list_todos(
    identity: Identity,
    State(tasks): State<TaskService>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<TodoListResponse>> {
    let pagination: Pagination = query.map(|Query(q)| q).unwrap_or_default().into();

    let data: Vec<TodoItem> = tasks
        .list(&identity, pagination)
        .await?
        .into_iter()
        .map(TodoItem::from)
        .collect();

    Ok(Json(TodoListResponse {
        success: true,
        data,
        page: pagination.page,
        limit: pagination.limit,
    }))
}

#[instrument(skip_all, fields(owner = %identity.account_id()))]
pub async fn update_todo(
    identity: Identity,
    State(tasks): State<TaskService>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
    body: std::result::Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let req = json_body(body)?;

    tasks
        .update(&identity, &id_param(query), &req.title, req.done)
        .await?;

    Ok(Json(MessageResponse::ok("Todo updated successfully")))
}

#[instrument(skip_all, fields(owner = %identity.account_id()))]
pub async fn update_todo_status(
    identity: Identity,
    State(tasks): State<TaskService>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
    body: std::result::Result<Json<UpdateTodoStatusRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let req = json_body(body)?;

    tasks
        .update_status(&identity, &id_param(query), req.done)
        .await?;

    Ok(Json(MessageResponse::ok("Todo status updated successfully")))
}

#[instrument(skip_all, fields(owner = %identity.account_id()))]
pub async fn delete_todo(
    identity: Identity,
    State(tasks): State<TaskService>,
    query: std::result::Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>> {
    tasks.delete(&identity, &id_param(query)).await?;

    Ok(Json(MessageResponse::ok("Todo deleted successfully")))
}

#[cfg(test)]
mod tests;
