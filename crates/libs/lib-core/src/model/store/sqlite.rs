//! # SQLite Store
//!
//! Embedded [`Store`] over a `sqlx` SQLite pool. Schema comes from the
//! embedded migrations in `migrations/`.
//!
//! ```rust,ignore
//! let store = SqliteStore::connect("sqlite:data/todo.db").await?;
//! let tasks = store.find_tasks(&owner, 0, 10).await?;
//! ```

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};
use tracing::{debug, warn};

use super::{clamp_i64, Store};
use crate::error::{AppError, Result};
use crate::model::{Account, AccountId, Task, TaskForUpdate, TaskId};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite-backed store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `database_url` and migrate it.
    pub async fn connect(database_url: &str) -> Result<Self> {
        // Ensure data directory exists for file databases
        if let Some(db_path) = database_url.strip_prefix("sqlite:") {
            let db_path = db_path.trim_start_matches("//");
            if !db_path.starts_with(":memory:") {
                if let Some(parent) = std::path::Path::new(db_path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)
                            .map_err(|e| AppError::Storage(e.to_string()))?;
                        debug!("Created database directory: {:?}", parent);
                    }
                }
            }
        }

        let options = database_url
            .parse::<SqliteConnectOptions>()?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Private in-memory database on a single connection.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, running pending migrations.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| AppError::Storage(format!("Migration failed: {}", e)))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: String,
    username: String,
    password_hash: String,
    created_at: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self> {
        Ok(Account {
            id: AccountId::parse(&row.id)
                .ok_or_else(|| AppError::Storage(format!("Corrupt account id: {}", row.id)))?,
            username: row.username,
            password_hash: row.password_hash,
            created_at: lib_utils::from_millis(row.created_at)
                .ok_or_else(|| AppError::Storage("Corrupt account timestamp".to_string()))?,
        })
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: String,
    owner_id: String,
    title: String,
    done: bool,
    created_at: i64,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self> {
        Ok(Task {
            id: TaskId::parse(&row.id)
                .map_err(|_| AppError::Storage(format!("Corrupt task id: {}", row.id)))?,
            owner_id: AccountId::parse(&row.owner_id)
                .ok_or_else(|| AppError::Storage(format!("Corrupt owner id: {}", row.owner_id)))?,
            title: row.title,
            done: row.done,
            created_at: lib_utils::from_millis(row.created_at)
                .ok_or_else(|| AppError::Storage("Corrupt task timestamp".to_string()))?,
        })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_account(&self, account: &Account) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO accounts (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(account.id.to_string())
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at.timestamp_millis())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, password_hash, created_at FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        sqlx::query(
            "INSERT INTO tasks (id, owner_id, title, done, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(task.id.to_string())
        .bind(task.owner_id.to_string())
        .bind(&task.title)
        .bind(task.done)
        .bind(task.created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_tasks(&self, owner: &AccountId, skip: u64, limit: u64) -> Result<Vec<Task>> {
        let mut rows = sqlx::query(
            "SELECT id, owner_id, title, done, created_at FROM tasks \
             WHERE owner_id = ? ORDER BY created_at, rowid LIMIT ? OFFSET ?",
        )
        .bind(owner.to_string())
        .bind(clamp_i64(limit))
        .bind(clamp_i64(skip))
        .fetch(&self.pool);

        let mut tasks = Vec::new();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| AppError::Retrieval(e.to_string()))?
        {
            let decoded = TaskRow::from_row(&row)
                .map_err(AppError::from)
                .and_then(Task::try_from);
            match decoded {
                Ok(task) => tasks.push(task),
                Err(e) => warn!("Error decoding todo: {}", e),
            }
        }

        Ok(tasks)
    }

    async fn update_task(
        &self,
        owner: &AccountId,
        id: &TaskId,
        update: &TaskForUpdate,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE tasks SET title = COALESCE(?, title), done = COALESCE(?, done) \
             WHERE id = ? AND owner_id = ?",
        )
        .bind(update.title.as_deref())
        .bind(update.done)
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_task(&self, owner: &AccountId, id: &TaskId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::in_memory()
            .await
            .expect("In-memory store should open")
    }

    #[tokio::test]
    async fn test_account_round_trip() {
        let store = store().await;
        let account = Account::new("alice", "$argon2id$fake");

        store.insert_account(&account).await.unwrap();
        let found = store.find_account_by_username("alice").await.unwrap();

        assert_eq!(found, Some(account));
        assert_eq!(store.find_account_by_username("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = store().await;
        store.insert_account(&Account::new("alice", "h1")).await.unwrap();

        let err = store
            .insert_account(&Account::new("alice", "h2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_find_tasks_is_owner_scoped_and_ordered() {
        let store = store().await;
        let alice = AccountId::new();
        let bob = AccountId::new();

        for i in 0..3 {
            store.insert_task(&Task::new(alice, format!("a{i}"))).await.unwrap();
        }
        store.insert_task(&Task::new(bob, "b0")).await.unwrap();

        let titles: Vec<String> = store
            .find_tasks(&alice, 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["a0", "a1", "a2"]);

        let page: Vec<String> = store
            .find_tasks(&alice, 1, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(page, ["a1"]);
    }

    #[tokio::test]
    async fn test_corrupt_rows_are_skipped() {
        let store = store().await;
        let owner = AccountId::new();
        store.insert_task(&Task::new(owner, "good")).await.unwrap();

        sqlx::query("INSERT INTO tasks (id, owner_id, title, done, created_at) VALUES ('bad-id', ?, 'bad', 0, 0)")
            .bind(owner.to_string())
            .execute(store.pool())
            .await
            .unwrap();

        let tasks = store.find_tasks(&owner, 0, 10).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "good");
    }

    #[tokio::test]
    async fn test_cursor_failure_is_retrieval_error() {
        let store = store().await;
        sqlx::query("DROP TABLE tasks")
            .execute(store.pool())
            .await
            .unwrap();

        let err = store.find_tasks(&AccountId::new(), 0, 10).await.unwrap_err();
        assert!(matches!(err, AppError::Retrieval(_)), "{err:?}");
        assert_eq!(err.code(), "RetrievalError");
    }

    #[tokio::test]
    async fn test_huge_offset_is_an_empty_page() {
        let store = store().await;
        let owner = AccountId::new();
        store.insert_task(&Task::new(owner, "x")).await.unwrap();

        let tasks = store.find_tasks(&owner, u64::MAX, 10).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_match_owner_and_id() {
        let store = store().await;
        let owner = AccountId::new();
        let stranger = AccountId::new();
        let task = Task::new(owner, "x");
        store.insert_task(&task).await.unwrap();

        let update = TaskForUpdate::new().title("y").done(true);
        assert_eq!(store.update_task(&stranger, &task.id, &update).await.unwrap(), 0);
        assert_eq!(store.update_task(&owner, &task.id, &update).await.unwrap(), 1);

        let status_only = TaskForUpdate::new().done(false);
        assert_eq!(store.update_task(&owner, &task.id, &status_only).await.unwrap(), 1);

        let stored = &store.find_tasks(&owner, 0, 10).await.unwrap()[0];
        assert_eq!(stored.title, "y");
        assert!(!stored.done);
        assert_eq!(stored.id, task.id);

        assert_eq!(store.delete_task(&stranger, &task.id).await.unwrap(), 0);
        assert_eq!(store.delete_task(&owner, &task.id).await.unwrap(), 1);
        assert_eq!(store.delete_task(&owner, &task.id).await.unwrap(), 0);
    }
}
