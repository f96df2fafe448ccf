//! # Persistence Store
//!
//! The document-store collaborator behind the services.
//!
//! [`Store`] is the narrow contract the services consume: insert one record,
//! find with filter/skip/limit, update one, delete one, each reporting how many
//! records it matched. Two implementations exist:
//!
//! - [`MongoStore`]: MongoDB collections `users` and `todos`
//! - [`SqliteStore`]: embedded SQLite, also used as the in-memory store in tests
//!
//! Services hold a [`DynStore`] injected at construction and wrap each call in
//! [`bounded`], so no persistence call outlives the configured timeout.
//!
//! ## Ordering
//!
//! `find_tasks` returns an owner's tasks oldest first by creation time. Ties
//! within the same millisecond break on insertion order in SQLite (`rowid`)
//! and on the task id in MongoDB; both are stable across pages.

// region: --- Modules
pub mod mongo;
pub mod sqlite;
// endregion: --- Modules

// region: --- Re-exports
pub use mongo::MongoStore;
pub use sqlite::SqliteStore;
// endregion: --- Re-exports

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, StoreKind};
use crate::error::{AppError, Result};
use crate::model::{Account, AccountId, Task, TaskForUpdate, TaskId};

/// Shared handle to the persistence collaborator.
pub type DynStore = Arc<dyn Store>;

/// Persistence operations used by the account and task services.
///
/// Implementations must be safe for concurrent use; they perform no locking of
/// their own and the last write to a record wins.
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip to the backend to prove it is reachable.
    async fn ping(&self) -> Result<()>;

    /// Persist a new account.
    ///
    /// # Errors
    ///
    /// [`AppError::UsernameTaken`] if the username already exists.
    async fn insert_account(&self, account: &Account) -> Result<()>;

    /// Look up an account by exact username.
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Persist a new task.
    async fn insert_task(&self, task: &Task) -> Result<()>;

    /// Tasks owned by `owner`, oldest first, skipping `skip` and capped at `limit`.
    ///
    /// Records that fail to decode are logged and skipped. A cursor-level
    /// failure is [`AppError::Retrieval`].
    async fn find_tasks(&self, owner: &AccountId, skip: u64, limit: u64) -> Result<Vec<Task>>;

    /// Apply `update` to the task matching both `id` and `owner`.
    ///
    /// Returns the number of matched tasks (0 or 1).
    async fn update_task(&self, owner: &AccountId, id: &TaskId, update: &TaskForUpdate)
        -> Result<u64>;

    /// Remove the task matching both `id` and `owner`.
    ///
    /// Returns the number of deleted tasks (0 or 1).
    async fn delete_task(&self, owner: &AccountId, id: &TaskId) -> Result<u64>;
}

/// Run a persistence call, failing with [`AppError::StorageTimeout`] once
/// `limit` elapses. The call is never retried.
pub async fn bounded<T, F>(limit: Duration, op: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, op)
        .await
        .map_err(|_| AppError::StorageTimeout(limit))?
}

/// Connect to the store selected by `DATABASE_URL` and prove it is reachable.
///
/// Failure here is fatal for the process.
pub async fn connect_store(config: &Config) -> Result<DynStore> {
    let timeout = config.db_timeout();

    let store: DynStore = match config.store_kind()? {
        StoreKind::Mongo => {
            info!("Connecting to MongoDB database '{}'...", config.database_name);
            let store = bounded(
                timeout,
                MongoStore::connect(&config.database_url, &config.database_name, timeout),
            )
            .await?;
            Arc::new(store)
        }
        StoreKind::Sqlite => {
            info!("Opening SQLite database...");
            let store = bounded(timeout, SqliteStore::connect(&config.database_url)).await?;
            Arc::new(store)
        }
    };

    bounded(timeout, store.ping()).await?;
    info!("Connected to database");

    Ok(store)
}

/// Clamp an unsigned window value into the signed range backends accept.
pub(crate) fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
