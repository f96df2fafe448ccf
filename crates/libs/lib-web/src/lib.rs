//! # Web Library
//!
//! HTTP surface of the to-do backend: identity propagation middleware,
//! account and task services, handlers, and server bootstrap.
//!
//! ## Endpoints
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | GET | `/` | none |
//! | GET | `/health` | none |
//! | POST | `/register` | none |
//! | POST | `/login` | none |
//! | POST | `/todos` | bearer |
//! | GET | `/todos?page=&limit=` | bearer |
//! | PUT | `/todos?id=` | bearer |
//! | PUT | `/todos/status?id=` | bearer |
//! | DELETE | `/todos?id=` | bearer |

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use server::{create_router, start_server, AppState, ServerConfig};
