//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers only translate between
//! HTTP and the services in [`crate::services`]; they hold no business rules.
//!
//! ## Handler Modules
//!
//! - **[`health`]**: Liveness probes
//!   - `GET /` - `{success, message}`
//!   - `GET /health` - plain `OK`
//!
//! - **[`auth`]**: Account endpoints
//!   - `POST /register` - Create account, answer with a token
//!   - `POST /login` - Check credentials, answer with a token
//!
//! - **[`todos`]**: Task endpoints (bearer token required)
//!   - `POST /todos` - Create task
//!   - `GET /todos?page=&limit=` - List own tasks
//!   - `PUT /todos?id=` - Overwrite title and done
//!   - `PUT /todos/status?id=` - Set done only
//!   - `DELETE /todos?id=` - Delete task
//!
//! ## Handler Architecture
//!
//! ```rust,ignore
//! async fn handler(
//!     identity: Identity,                                   // set by require_auth
//!     State(tasks): State<TaskService>,                     // service from AppState
//!     body: Result<Json<RequestBody>, JsonRejection>,       // body, rejection kept
//! ) -> Result<Json<Response>, AppError> {
//!     let Json(req) = json_body(body)?;
//!     Ok(Json(response))
//! }
//! ```
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`. [`AppError`] renders itself as
//! `{success: false, error, code}` with the mapped status. Body rejections are
//! turned into [`AppError::Validation`] so every 400 has the same shape.

pub mod auth;
pub mod health;
pub mod todos;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query},
    Json,
};
use lib_core::{AppError, Result};
use serde::Deserialize;
use tracing::debug;

/// `?id=` query parameter of the single-task endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Unwrap a JSON body, mapping any rejection to a validation error.
pub(crate) fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(AppError::Validation("Invalid request body".to_string()))
        }
    }
}

/// Raw `id` query value; absent or unreadable yields an empty string, which
/// the services reject as an invalid id.
pub(crate) fn id_param(query: std::result::Result<Query<IdQuery>, QueryRejection>) -> String {
    query
        .ok()
        .and_then(|Query(q)| q.id)
        .unwrap_or_default()
}
