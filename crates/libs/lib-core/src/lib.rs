//! # Core Library
//!
//! Configuration, error taxonomy, domain model and persistence for the to-do
//! backend.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{Config, StoreKind};
pub use error::{AppError, Result};
pub use model::{AccountId, Account, Identity, Pagination, Task, TaskForUpdate, TaskId};
pub use model::store::{bounded, connect_store, DynStore, Store};
