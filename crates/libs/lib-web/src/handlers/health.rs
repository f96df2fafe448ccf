//! # Health Handlers

use axum::Json;
use shared::MessageResponse;

/// `GET /` liveness probe.
pub async fn live() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Hi, I am live"))
}

/// `GET /health` for load balancers.
pub async fn health() -> &'static str {
    "OK"
}
