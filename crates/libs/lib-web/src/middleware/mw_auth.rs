//! # Authentication Middleware
//!
//! Verifies the bearer token on protected routes and propagates the caller's
//! [`Identity`] to the handler.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, Router, routing::get};
//! use lib_web::middleware::require_auth;
//!
//! let todos = Router::new()
//!     .route("/todos", get(list_todos))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers then take the identity as an extractor:
//!
//! ```rust,ignore
//! async fn list_todos(identity: Identity) -> String {
//!     format!("Hello, {}!", identity.username())
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use lib_auth::decode_jwt;
use lib_core::{AccountId, AppError, Config, Identity, Result};
use tracing::{debug, warn};

/// Resolve the caller's identity from the `Authorization` header.
///
/// # Errors
///
/// - [`AppError::MissingCredentials`] if the header is absent
/// - [`AppError::MalformedCredentials`] if it is not `Bearer <token>`
/// - [`AppError::Unauthenticated`] if the token fails verification
pub fn authenticate(headers: &HeaderMap, jwt_secret: &str) -> Result<Identity> {
    let auth_header = headers.get(AUTHORIZATION).ok_or_else(|| {
        warn!("[AUTH] Missing Authorization header");
        AppError::MissingCredentials
    })?;

    let auth_header = auth_header.to_str().map_err(|_| {
        warn!("[AUTH] Non-ASCII Authorization header");
        AppError::MalformedCredentials
    })?;

    // Scheme is case-insensitive; exactly one token must follow it
    let token = match auth_header.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") => token.trim(),
        _ => {
            warn!("[AUTH] Invalid Authorization header format");
            return Err(AppError::MalformedCredentials);
        }
    };
    if token.is_empty() || token.contains(char::is_whitespace) {
        warn!("[AUTH] Invalid Authorization header format");
        return Err(AppError::MalformedCredentials);
    }

    let claims = decode_jwt(token, jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::Unauthenticated
    })?;

    let account_id = AccountId::parse(&claims.sub).ok_or_else(|| {
        warn!("[AUTH] Token subject is not an account id");
        AppError::Unauthenticated
    })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", claims.username, account_id);
    Ok(Identity::new(account_id, claims.username))
}

/// Authentication middleware for protected routes.
///
/// On success the [`Identity`] is inserted into the request extensions for the
/// rest of this request only; on failure the request is answered with 401 and
/// never reaches the handler.
pub async fn require_auth(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let identity = authenticate(req.headers(), &config.jwt_secret)?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
