//! # Authentication Data Transfer Objects
//!
//! Request and response bodies for `POST /register` and `POST /login`.
//!
//! Both endpoints take the same body and answer with a bare token:
//!
//! ```text
//! POST /login
//! Content-Type: application/json
//!
//! { "username": "alice", "password": "hunter2" }
//! ```
//!
//! ```text
//! { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
//! ```

use serde::{Deserialize, Serialize};

/// Username/password pair sent to register and login.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// JSON layer, decides what an absent value means.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Signed identity token returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}
