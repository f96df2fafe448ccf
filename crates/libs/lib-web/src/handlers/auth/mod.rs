//! # Authentication Handlers
//!
//! HTTP request handlers for account endpoints.
//!
//! ## Overview
//!
//! - `POST /register` creates an account and answers `{token}`
//! - `POST /login` checks credentials and answers `{token}`
//!
//! Both take `{username, password}`. The token is an HS256 JWT whose subject is
//! the account id; clients send it back as `Authorization: Bearer <token>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//!
//! let app = Router::new()
//!     .route("/register", post(register))
//!     .route("/login", post(login));
//! ```

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use lib_core::Result;
use shared::{CredentialsRequest, TokenResponse};
use tracing::instrument;

use super::json_body;
use crate::services::AccountService;

/// Register handler - creates a new account.
///
/// # Returns
///
/// * `200 {token}` - account created
/// * `400` - bad body, empty username or password
/// * `409` - username taken
#[instrument(skip_all)]
pub async fn register(
    State(accounts): State<AccountService>,
    body: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let req = json_body(body)?;

    let token = accounts.register(&req.username, &req.password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Login handler - authenticates an existing account.
///
/// # Returns
///
/// * `200 {token}` - credentials match
/// * `400` - body is not JSON
/// * `401 Invalid credentials` - unknown username, wrong or empty password
#[instrument(skip_all)]
pub async fn login(
    State(accounts): State<AccountService>,
    body: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let req = json_body(body)?;

    let token = accounts.login(&req.username, &req.password).await?;

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests;
