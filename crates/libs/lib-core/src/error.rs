//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all backend modules. Every error is converted to an HTTP response at the
//! request boundary; none is retried.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`Validation`](AppError::Validation), [`InvalidId`](AppError::InvalidId) → 400
//!    - [`MissingCredentials`](AppError::MissingCredentials),
//!      [`MalformedCredentials`](AppError::MalformedCredentials),
//!      [`Unauthenticated`](AppError::Unauthenticated),
//!      [`Unauthorized`](AppError::Unauthorized),
//!      [`InvalidCredentials`](AppError::InvalidCredentials) → 401
//!    - [`NotFoundOrForbidden`](AppError::NotFoundOrForbidden) → 404
//!    - [`UsernameTaken`](AppError::UsernameTaken) → 409
//!
//! 2. **Server Errors** (5xx)
//!    - [`StorageTimeout`](AppError::StorageTimeout), [`Retrieval`](AppError::Retrieval),
//!      [`Storage`](AppError::Storage), [`Hashing`](AppError::Hashing),
//!      [`Signing`](AppError::Signing), [`Config`](AppError::Config),
//!      [`Internal`](AppError::Internal) → 500
//!
//! ## Response Body
//!
//! ```text
//! { "success": false, "error": "Todo not found or unauthorized", "code": "NotFoundOrForbidden" }
//! ```
//!
//! Server errors answer with a generic message; the detail only reaches the log.

use std::time::Duration;

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use shared::ErrorResponse;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input (empty title, empty username, bad JSON body).
    #[error("{0}")]
    Validation(String),

    /// A task id that is not a well-formed identifier.
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// No `Authorization` header on a protected route.
    #[error("Missing Authorization Header")]
    MissingCredentials,

    /// `Authorization` header present but not `Bearer <token>`.
    #[error("Malformed Authorization Header")]
    MalformedCredentials,

    /// Bearer token failed verification (signature, structure, expiry).
    #[error("Invalid token")]
    Unauthenticated,

    /// Handler reached without an authenticated identity.
    #[error("Unauthorized")]
    Unauthorized,

    /// Unknown username or wrong password; the two are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No task matches both the id and the caller. Covers "absent" and "not yours".
    #[error("Todo not found or unauthorized")]
    NotFoundOrForbidden,

    /// Registration with a username that already exists.
    #[error("Username already taken")]
    UsernameTaken,

    /// A persistence call did not finish within its bound.
    #[error("Storage call timed out after {0:?}")]
    StorageTimeout(Duration),

    /// Listing failed at the cursor level.
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Any other persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Password hashing failed.
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// Token signing failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::MissingCredentials
            | AppError::MalformedCredentials
            | AppError::Unauthenticated
            | AppError::Unauthorized
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::StorageTimeout(_)
            | AppError::Retrieval(_)
            | AppError::Storage(_)
            | AppError::Hashing(_)
            | AppError::Signing(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidId(_) => "Invalid ID format".to_string(),
            AppError::StorageTimeout(_) => "The request timed out".to_string(),
            AppError::Retrieval(_) => "Could not retrieve todos".to_string(),
            AppError::Storage(_)
            | AppError::Hashing(_)
            | AppError::Signing(_)
            | AppError::Config(_)
            | AppError::Internal(_) => "An internal error occurred".to_string(),
            client_error => client_error.to_string(),
        }
    }

    /// Stable machine-readable name of the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::InvalidId(_) => "InvalidId",
            AppError::MissingCredentials => "MissingCredentials",
            AppError::MalformedCredentials => "MalformedCredentials",
            AppError::Unauthenticated => "Unauthenticated",
            AppError::Unauthorized => "Unauthorized",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::NotFoundOrForbidden => "NotFoundOrForbidden",
            AppError::UsernameTaken => "UsernameTaken",
            AppError::StorageTimeout(_) => "StorageTimeout",
            AppError::Retrieval(_) => "RetrievalError",
            AppError::Storage(_) => "StorageError",
            AppError::Hashing(_) => "HashingFailure",
            AppError::Signing(_) => "SigningFailure",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.user_message(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                AppError::Storage(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Storage(format!("Database error: {}", err)),
        }
    }
}

/// Convert `mongodb::error::Error` to `AppError`.
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Storage(format!("Document store error: {}", err))
    }
}
