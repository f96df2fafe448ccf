//! # Task Data Transfer Objects
//!
//! Bodies for the `/todos` endpoints.
//!
//! | Endpoint | Request | Response |
//! |---|---|---|
//! | `POST /todos` | [`CreateTodoRequest`] | [`TodoResponse`] |
//! | `GET /todos?page=&limit=` | | [`TodoListResponse`] |
//! | `PUT /todos?id=` | [`UpdateTodoRequest`] | [`MessageResponse`](super::MessageResponse) |
//! | `PUT /todos/status?id=` | [`UpdateTodoStatusRequest`] | [`MessageResponse`](super::MessageResponse) |
//! | `DELETE /todos?id=` | | [`MessageResponse`](super::MessageResponse) |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task as seen by clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Create a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
}

/// Overwrite the title and completion flag of a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Change only the completion flag of a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodoStatusRequest {
    pub done: bool,
}

/// `{success, data}` envelope around a single task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    pub success: bool,
    pub data: TodoItem,
}

/// One page of the caller's tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListResponse {
    pub success: bool,
    pub data: Vec<TodoItem>,
    pub page: u64,
    pub limit: u64,
}
