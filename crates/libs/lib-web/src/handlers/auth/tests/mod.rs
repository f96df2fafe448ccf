//! # Auth Handler Tests
//!
//! Test suite for the account handlers (register and login).


pub(super) use crate::test_utils::{register, send, test_app, TEST_SECRET};
pub(super) use axum::http::StatusCode;
pub(super) use serde_json::json;
