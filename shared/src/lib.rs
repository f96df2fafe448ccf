//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between API clients and the to-do backend.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Registration and login bodies
//!   - **[`dto::todo`]**: Task bodies and envelopes
//!   - **[`dto::common`]**: Message and error envelopes
//!
//! ## Wire Format
//!
//! Auth and envelope DTOs keep the default snake_case field names. Task items
//! use camelCase (`ownerId`, `createdAt`).
//!
//! ## Usage in Backend
//!
//! ```rust,ignore
//! use shared::dto::auth::{CredentialsRequest, TokenResponse};
//! use axum::Json;
//!
//! async fn login(Json(request): Json<CredentialsRequest>) -> Json<TokenResponse> {
//!     # todo!()
//! }
//! ```

pub mod dto;

// DTO library: every export is public API
pub use dto::*;
