//! # Tasks
//!
//! A task belongs to exactly one account (`owner_id`) for its whole life. Only
//! `title` and `done` ever change; deletion is physical.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::TodoItem;
use uuid::Uuid;

use super::account::AccountId;
use crate::error::{AppError, Result};

/// Opaque task identifier, generated at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client-supplied identifier.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidId`] if `raw` is not a well-formed identifier.
    pub fn parse(raw: &str) -> Result<Self> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|e| AppError::InvalidId(e.to_string()))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// To-do item owned by a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: AccountId,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// New, not yet done task for `owner_id`.
    pub fn new(owner_id: AccountId, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            owner_id,
            title: title.into(),
            done: false,
            created_at: lib_utils::now_utc(),
        }
    }
}

impl From<Task> for TodoItem {
    fn from(task: Task) -> Self {
        TodoItem {
            id: task.id.to_string(),
            owner_id: task.owner_id.to_string(),
            title: task.title,
            done: task.done,
            created_at: task.created_at,
        }
    }
}

/// Fields to overwrite on an existing task.
///
/// Only provided fields are written; `id` and `owner_id` cannot be changed.
/// Callers always set at least one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForUpdate {
    pub title: Option<String>,
    pub done: Option<bool>,
}

impl TaskForUpdate {
    /// Create a new empty `TaskForUpdate` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the completion flag.
    pub fn done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }
}

/// Offset/limit window over an owner's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Build from raw query values.
    ///
    /// Absent, unparsable, zero or negative values silently fall back to the
    /// defaults; this never fails.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Number of records before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
}
