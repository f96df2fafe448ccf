//! # Services Layer
//!
//! Business logic between the HTTP handlers and the persistence store.
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Store (MongoDB / SQLite)
//! ```
//!
//! ## Module Organization
//!
//! - [`account`] - Registration, login and token issuance
//! - [`task`] - Owner-scoped task create/list/update/delete
//!
//! ## Service Pattern
//!
//! Services are cheap-to-clone structs holding their collaborators, injected
//! once at startup. Every store call goes through [`lib_core::bounded`] with the
//! configured timeout, and the caller's identity is always an explicit argument:
//!
//! ```rust,ignore
//! let tasks = TaskService::new(store, config.db_timeout());
//! let page = tasks.list(&identity, Pagination::default()).await?;
//! ```
//!
//! ## Testing
//!
//! Services are tested against an in-memory [`SqliteStore`](lib_core::model::store::SqliteStore)
//! or a hand-written [`Store`](lib_core::Store) double.

pub mod account;
pub mod task;

pub use account::AccountService;
pub use task::TaskService;
