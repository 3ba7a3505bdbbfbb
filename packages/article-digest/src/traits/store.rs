//! Task store abstraction.
//!
//! The store is keyed by task id. Writes are partial merges: the lifecycle
//! manager never rewrites a whole record.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::task::{Task, TaskCommit, TaskId, TaskRequest};

/// Persistent record store for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a newly submitted task.
    async fn insert(&self, task: &Task) -> StoreResult<()>;

    /// Get a task by id.
    async fn get(&self, id: &TaskId) -> StoreResult<Option<Task>>;

    /// Move a task from `pending` to `processing`.
    ///
    /// Returns `false` (and writes nothing) when the task is in any other
    /// state, so terminal tasks are never reopened.
    async fn mark_processing(&self, id: &TaskId) -> StoreResult<bool>;

    /// Merge a terminal commit into the record (last write wins).
    async fn commit(&self, id: &TaskId, commit: &TaskCommit) -> StoreResult<()>;

    /// Atomically claim up to `limit` tasks, oldest first, leasing each for `lease`.
    ///
    /// Claimable tasks are `pending` ones and `processing` ones whose lease has
    /// expired (the worker holding them died before committing). A commit
    /// releases the lease. Tasks moved to `processing` by [`mark_processing`]
    /// alone carry no lease and are never reclaimed.
    ///
    /// [`mark_processing`]: TaskStore::mark_processing
    async fn claim_pending(&self, limit: usize, lease: Duration) -> StoreResult<Vec<TaskRequest>>;
}
