//! # MongoDB Store
//!
//! [`Store`] over a MongoDB database with two collections:
//!
//! - `users`: `{_id, username, password_hash, created_at}`, unique on `username`
//! - `todos`: `{_id, owner_id, title, done, created_at}`, indexed on `(owner_id, created_at)`
//!
//! Ids are stored as UUID strings in `_id`; timestamps as BSON dates. Tasks
//! created in the same millisecond are ordered by `_id`, which is stable but
//! not insertion order.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, DateTime as BsonDateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, FindOptions, IndexOptions},
    Client, Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{clamp_i64, Store};
use crate::error::{AppError, Result};
use crate::model::{Account, AccountId, Task, TaskForUpdate, TaskId};

const USERS_COLLECTION: &str = "users";
const TODOS_COLLECTION: &str = "todos";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB-backed store.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    accounts: Collection<AccountDocument>,
    tasks: Collection<TaskDocument>,
}

impl MongoStore {
    /// Connect to `database_url`, select `database_name` and ensure indexes.
    ///
    /// `timeout` bounds server selection and connection establishment.
    pub async fn connect(database_url: &str, database_name: &str, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(database_url).await?;
        options.app_name = Some("todo-backend".to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let store = Self::from_database(client.database(database_name));
        store.ensure_indexes().await?;

        Ok(store)
    }

    /// Wrap an already selected database.
    pub fn from_database(db: Database) -> Self {
        Self {
            accounts: db.collection(USERS_COLLECTION),
            tasks: db.collection(TODOS_COLLECTION),
            db,
        }
    }

    async fn ensure_indexes(&self) -> Result<()> {
        let unique_username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.accounts.create_index(unique_username).await?;

        let owner_created = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "created_at": 1 })
            .build();
        self.tasks.create_index(owner_created).await?;

        debug!("MongoDB indexes ensured");
        Ok(())
    }

    fn owned_task_filter(owner: &AccountId, id: &TaskId) -> Document {
        doc! { "_id": id.to_string(), "owner_id": owner.to_string() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AccountDocument {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    password_hash: String,
    created_at: BsonDateTime,
}

impl From<&Account> for AccountDocument {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            created_at: BsonDateTime::from_millis(account.created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<AccountDocument> for Account {
    type Error = AppError;

    fn try_from(document: AccountDocument) -> Result<Self> {
        Ok(Account {
            id: AccountId::parse(&document.id)
                .ok_or_else(|| AppError::Storage(format!("Corrupt account id: {}", document.id)))?,
            username: document.username,
            password_hash: document.password_hash,
            created_at: lib_utils::from_millis(document.created_at.timestamp_millis())
                .ok_or_else(|| AppError::Storage("Corrupt account timestamp".to_string()))?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: String,
    owner_id: String,
    title: String,
    done: bool,
    created_at: BsonDateTime,
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            owner_id: task.owner_id.to_string(),
            title: task.title.clone(),
            done: task.done,
            created_at: BsonDateTime::from_millis(task.created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<TaskDocument> for Task {
    type Error = AppError;

    fn try_from(document: TaskDocument) -> Result<Self> {
        Ok(Task {
            id: TaskId::parse(&document.id)
                .map_err(|_| AppError::Storage(format!("Corrupt task id: {}", document.id)))?,
            owner_id: AccountId::parse(&document.owner_id).ok_or_else(|| {
                AppError::Storage(format!("Corrupt owner id: {}", document.owner_id))
            })?,
            title: document.title,
            done: document.done,
            created_at: lib_utils::from_millis(document.created_at.timestamp_millis())
                .ok_or_else(|| AppError::Storage("Corrupt task timestamp".to_string()))?,
        })
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Sort and window for listing. Skip and limit are clamped to the signed range
/// the server accepts, so a page far past the end is simply empty.
fn page_options(skip: u64, limit: u64) -> FindOptions {
    FindOptions::builder()
        .sort(doc! { "created_at": 1, "_id": 1 })
        .skip(clamp_i64(skip).unsigned_abs())
        .limit(clamp_i64(limit))
        .build()
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn insert_account(&self, account: &Account) -> Result<()> {
        match self.accounts.insert_one(AccountDocument::from(account)).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(AppError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.accounts
            .find_one(doc! { "username": username })
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        self.tasks.insert_one(TaskDocument::from(task)).await?;
        Ok(())
    }

    async fn find_tasks(&self, owner: &AccountId, skip: u64, limit: u64) -> Result<Vec<Task>> {
        // Untyped cursor so a single bad document is skipped rather than failing the page
        let raw: Collection<Document> = self.db.collection(TODOS_COLLECTION);
        let mut cursor = raw
            .find(doc! { "owner_id": owner.to_string() })
            .with_options(page_options(skip, limit))
            .await
            .map_err(|e| AppError::Retrieval(e.to_string()))?;

        let mut tasks = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Retrieval(e.to_string()))?
        {
            let decoded = bson::from_document::<TaskDocument>(document)
                .map_err(|e| AppError::Storage(e.to_string()))
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
        let filter = Self::owned_task_filter(owner, id);

        let mut set = Document::new();
        if let Some(title) = &update.title {
            set.insert("title", title.as_str());
        }
        if let Some(done) = update.done {
            set.insert("done", done);
        }

        let result = self.tasks.update_one(filter, doc! { "$set": set }).await?;
        Ok(result.matched_count)
    }

    async fn delete_task(&self, owner: &AccountId, id: &TaskId) -> Result<u64> {
        let result = self
            .tasks
            .delete_one(Self::owned_task_filter(owner, id))
            .await?;
        Ok(result.deleted_count)
    }
}
