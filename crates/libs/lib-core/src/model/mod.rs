//! # Domain Model
//!
//! Accounts, tasks, the authenticated identity, and pagination.
//!
//! - [`account`]: registered users and their password hashes
//! - [`task`]: owner-scoped to-do items
//! - [`identity`]: the verified caller, threaded explicitly into services
//! - [`store`]: the persistence collaborator

// region: --- Modules
pub mod account;
pub mod identity;
pub mod store;
pub mod task;
// endregion: --- Modules

// region: --- Re-exports
pub use account::{Account, AccountId};
pub use identity::Identity;
pub use task::{Pagination, Task, TaskForUpdate, TaskId};
// endregion: --- Re-exports
