//! # Task Service
//!
//! Owner-scoped task operations. Every store call filters on the caller's
//! account id as well as the task id, so a task that exists but belongs to
//! someone else is indistinguishable from one that does not exist
//! ([`AppError::NotFoundOrForbidden`]).
//!
//! Updates are last-write-wins; two concurrent updates of the same task may
//! interleave and the later write is kept.

use std::time::Duration;

use lib_core::{
    bounded, AppError, DynStore, Identity, Pagination, Result, Task, TaskForUpdate, TaskId,
};
use lib_utils::validate_not_empty;
use tracing::{debug, info, instrument, warn};

/// Task operations over the injected store.
#[derive(Clone)]
pub struct TaskService {
    store: DynStore,
    timeout: Duration,
}

impl TaskService {
    pub fn new(store: DynStore, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Create a not-yet-done task owned by the caller.
    #[instrument(skip(self, identity), fields(owner = %identity.account_id()))]
    pub async fn create(&self, identity: &Identity, title: &str) -> Result<Task> {
        validate_title(title)?;

        let task = Task::new(*identity.account_id(), title);
        bounded(self.timeout, self.store.insert_task(&task)).await?;

        info!("[TODOS] Created todo {}", task.id);
        Ok(task)
    }

    /// One page of the caller's tasks, oldest first.
    ///
    /// A page past the end is an empty list, not an error.
    #[instrument(skip(self, identity), fields(owner = %identity.account_id()))]
    pub async fn list(&self, identity: &Identity, pagination: Pagination) -> Result<Vec<Task>> {
        let tasks = bounded(
            self.timeout,
            self.store
                .find_tasks(identity.account_id(), pagination.skip(), pagination.limit),
        )
        .await?;

        debug!("[TODOS] Listed {} todos (page {})", tasks.len(), pagination.page);
        Ok(tasks)
    }

    /// Overwrite title and completion flag of one of the caller's tasks.
    ///
    /// Validation order: title, then id, then ownership.
    #[instrument(skip(self, identity, title), fields(owner = %identity.account_id()))]
    pub async fn update(&self, identity: &Identity, raw_id: &str, title: &str, done: bool) -> Result<()> {
        validate_title(title)?;
        let id = TaskId::parse(raw_id)?;

        let update = TaskForUpdate::new().title(title).done(done);
        self.apply(identity, &id, &update).await?;

        info!("[TODOS] Updated todo {}", id);
        Ok(())
    }

    /// Set only the completion flag of one of the caller's tasks.
    #[instrument(skip(self, identity), fields(owner = %identity.account_id()))]
    pub async fn update_status(&self, identity: &Identity, raw_id: &str, done: bool) -> Result<()> {
        let id = TaskId::parse(raw_id)?;

        self.apply(identity, &id, &TaskForUpdate::new().done(done)).await?;

        info!("[TODOS] Set todo {} done={}", id, done);
        Ok(())
    }

    /// Remove one of the caller's tasks.
    #[instrument(skip(self, identity), fields(owner = %identity.account_id()))]
    pub async fn delete(&self, identity: &Identity, raw_id: &str) -> Result<()> {
        let id = TaskId::parse(raw_id)?;

        let deleted = bounded(self.timeout, self.store.delete_task(identity.account_id(), &id)).await?;
        if deleted == 0 {
            warn!("[TODOS] Delete matched nothing for {}", id);
            return Err(AppError::NotFoundOrForbidden);
        }

        info!("[TODOS] Deleted todo {}", id);
        Ok(())
    }

    async fn apply(&self, identity: &Identity, id: &TaskId, update: &TaskForUpdate) -> Result<()> {
        let matched = bounded(
            self.timeout,
            self.store.update_task(identity.account_id(), id, update),
        )
        .await?;

        if matched == 0 {
            warn!("[TODOS] Update matched nothing for {}", id);
            return Err(AppError::NotFoundOrForbidden);
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<()> {
    validate_not_empty(title, "Title").map_err(AppError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_store, SlowStore};
    use lib_core::AccountId;
    use std::sync::Arc;

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn service() -> TaskService {
        TaskService::new(test_store().await, TIMEOUT)
    }

    fn identity(name: &str) -> Identity {
        Identity::new(AccountId::new(), name)
    }

    #[tokio::test]
    async fn test_create_sets_owner_and_not_done() {
        let tasks = service().await;
        let alice = identity("alice");

        let task = tasks.create(&alice, "x").await.unwrap();

        assert_eq!(&task.owner_id, alice.account_id());
        assert_eq!(task.title, "x");
        assert!(!task.done);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let tasks = service().await;

        let err = tasks.create(&identity("alice"), "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Title is required"));
    }

    #[tokio::test]
    async fn test_list_only_returns_own_tasks() {
        let tasks = service().await;
        let alice = identity("alice");
        let bob = identity("bob");

        tasks.create(&alice, "a").await.unwrap();
        tasks.create(&bob, "b").await.unwrap();

        let listed = tasks.list(&alice, Pagination::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "a");
    }

    #[tokio::test]
    async fn test_list_pages() {
        let tasks = service().await;
        let alice = identity("alice");
        for i in 1..=12 {
            tasks.create(&alice, &format!("t{i}")).await.unwrap();
        }

        let second = tasks
            .list(&alice, Pagination { page: 2, limit: 5 })
            .await
            .unwrap();
        let titles: Vec<_> = second.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["t6", "t7", "t8", "t9", "t10"]);

        let beyond = tasks
            .list(&alice, Pagination { page: 10, limit: 5 })
            .await
            .unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_update_validation_order() {
        let tasks = service().await;
        let alice = identity("alice");

        // Empty title wins over a bad id
        let err = tasks.update(&alice, "garbage", "", true).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = tasks.update(&alice, "garbage", "y", true).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidId(_)));

        let err = tasks
            .update(&alice, &TaskId::new().to_string(), "y", true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrForbidden));
    }

    #[tokio::test]
    async fn test_update_someone_elses_task() {
        let tasks = service().await;
        let alice = identity("alice");
        let bob = identity("bob");
        let task = tasks.create(&alice, "x").await.unwrap();

        let err = tasks
            .update(&bob, &task.id.to_string(), "mine now", true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrForbidden));

        let listed = tasks.list(&alice, Pagination::default()).await.unwrap();
        assert_eq!(listed[0].title, "x");
        assert!(!listed[0].done);
    }

    #[tokio::test]
    async fn test_update_overwrites_title_and_done() {
        let tasks = service().await;
        let alice = identity("alice");
        let task = tasks.create(&alice, "x").await.unwrap();

        tasks.update(&alice, &task.id.to_string(), "y", true).await.unwrap();

        let listed = tasks.list(&alice, Pagination::default()).await.unwrap();
        assert_eq!(listed[0].id, task.id);
        assert_eq!(listed[0].title, "y");
        assert!(listed[0].done);
    }

    #[tokio::test]
    async fn test_update_status_keeps_title() {
        let tasks = service().await;
        let alice = identity("alice");
        let task = tasks.create(&alice, "x").await.unwrap();

        tasks.update_status(&alice, &task.id.to_string(), true).await.unwrap();

        let listed = tasks.list(&alice, Pagination::default()).await.unwrap();
        assert_eq!(listed[0].title, "x");
        assert!(listed[0].done);

        let err = tasks
            .update_status(&identity("bob"), &task.id.to_string(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrForbidden));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let tasks = service().await;
        let alice = identity("alice");
        let task = tasks.create(&alice, "x").await.unwrap();

        tasks.delete(&alice, &task.id.to_string()).await.unwrap();

        let err = tasks.delete(&alice, &task.id.to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrForbidden));
        assert!(tasks.list(&alice, Pagination::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_bad_id() {
        let tasks = service().await;

        let err = tasks.delete(&identity("alice"), "").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let tasks = TaskService::new(Arc::new(SlowStore), Duration::from_millis(20));
        let alice = identity("alice");

        let err = tasks.create(&alice, "x").await.unwrap_err();
        assert!(matches!(err, AppError::StorageTimeout(_)));

        let err = tasks.list(&alice, Pagination::default()).await.unwrap_err();
        assert!(matches!(err, AppError::StorageTimeout(_)));
    }
}
