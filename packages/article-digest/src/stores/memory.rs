//! In-memory task store for tests and one-shot runs.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::TaskStore;
use crate::types::task::{Task, TaskCommit, TaskId, TaskRequest, TaskStatus};

/// In-memory task records keyed by id.
///
/// Data is lost on restart.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,

    /// Lease expiry of claimed tasks
    leases: RwLock<HashMap<TaskId, DateTime<Utc>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<TaskId, Task>> {
        self.tasks.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<TaskId, Task>> {
        self.tasks.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_leases(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<TaskId, DateTime<Utc>>> {
        self.leases.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: &Task) -> StoreResult<()> {
        self.write().insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn get(&self, id: &TaskId) -> StoreResult<Option<Task>> {
        Ok(self.read().get(id).cloned())
    }

    async fn mark_processing(&self, id: &TaskId) -> StoreResult<bool> {
        let mut tasks = self.write();
        match tasks.get_mut(id) {
            Some(task) if task.status == TaskStatus::Pending => {
                task.status = TaskStatus::Processing;
                task.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(&self, id: &TaskId, commit: &TaskCommit) -> StoreResult<()> {
        let mut tasks = self.write();
        let task = tasks.get_mut(id).ok_or_else(|| StoreError::NotFound {
            id: id.to_string(),
        })?;
        task.apply(commit);
        self.write_leases().remove(id);
        Ok(())
    }

    async fn claim_pending(&self, limit: usize, lease: Duration) -> StoreResult<Vec<TaskRequest>> {
        let now = Utc::now();
        let expires = chrono::Duration::from_std(lease)
            .ok()
            .and_then(|lease| now.checked_add_signed(lease))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut tasks = self.write();
        let mut leases = self.write_leases();

        let mut claimable: Vec<&mut Task> = tasks
            .values_mut()
            .filter(|t| match t.status {
                TaskStatus::Pending => true,
                TaskStatus::Processing => leases.get(&t.id).is_some_and(|at| *at <= now),
                _ => false,
            })
            .collect();
        claimable.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

        Ok(claimable
            .into_iter()
            .take(limit)
            .map(|task| {
                if task.status == TaskStatus::Processing {
                    warn!(task_id = %task.id, "Recovered task with expired lease");
                }
                task.status = TaskStatus::Processing;
                task.updated_at = now;
                leases.insert(task.id.clone(), expires);
                TaskRequest::new(task.id.clone(), task.url.clone())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEASE: Duration = Duration::from_secs(600);

    fn completed() -> TaskCommit {
        TaskCommit::Completed {
            title: "Title".into(),
            summary: "Summary".into(),
            topics: vec!["Tech".into(), "AI".into()],
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryTaskStore::new();
        let task = Task::pending(TaskId::new("a"), "https://example.com");
        store.insert(&task).await.unwrap();

        assert_eq!(store.get(&task.id).await.unwrap(), Some(task));
        assert_eq!(store.get(&TaskId::new("b")).await.unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_processing_only_from_pending() {
        let store = MemoryTaskStore::new();
        let id = TaskId::new("a");
        store
            .insert(&Task::pending(id.clone(), "https://example.com"))
            .await
            .unwrap();

        assert!(store.mark_processing(&id).await.unwrap());
        assert!(!store.mark_processing(&id).await.unwrap());

        store.commit(&id, &completed()).await.unwrap();
        assert!(!store.mark_processing(&id).await.unwrap());
        assert_eq!(
            store.get(&id).await.unwrap().unwrap().status,
            TaskStatus::Completed
        );

        assert!(!store.mark_processing(&TaskId::new("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn test_commit_missing_task() {
        let store = MemoryTaskStore::new();
        let err = store
            .commit(&TaskId::new("missing"), &completed())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_claim_pending_respects_limit() {
        let store = MemoryTaskStore::new();
        for id in ["a", "b", "c"] {
            store
                .insert(&Task::pending(TaskId::new(id), "https://example.com"))
                .await
                .unwrap();
        }

        let first = store.claim_pending(2, LEASE).await.unwrap();
        let second = store.claim_pending(2, LEASE).await.unwrap();
        let third = store.claim_pending(2, LEASE).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn test_expired_lease_is_reclaimed() {
        let store = MemoryTaskStore::new();
        let id = TaskId::new("crashed");
        store
            .insert(&Task::pending(id.clone(), "https://example.com"))
            .await
            .unwrap();

        // Worker claims and dies without committing
        let claimed = store.claim_pending(10, Duration::ZERO).await.unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(
            store.get(&id).await.unwrap().unwrap().status,
            TaskStatus::Processing
        );

        let reclaimed = store.claim_pending(10, LEASE).await.unwrap();
        assert_eq!(reclaimed.len(), 1);
        assert_eq!(reclaimed[0].task_id, id);
    }

    #[tokio::test]
    async fn test_live_lease_and_committed_tasks_are_not_reclaimed() {
        let store = MemoryTaskStore::new();
        let insert = |id: &str| Task::pending(TaskId::new(id), "https://example.com");

        store.insert(&insert("live")).await.unwrap();
        assert_eq!(store.claim_pending(10, LEASE).await.unwrap().len(), 1);

        store.insert(&insert("done")).await.unwrap();
        let claimed = store.claim_pending(10, Duration::ZERO).await.unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].task_id, TaskId::new("done"));
        store.commit(&TaskId::new("done"), &completed()).await.unwrap();

        assert!(store.claim_pending(10, LEASE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_processing_alone_is_never_reclaimed() {
        let store = MemoryTaskStore::new();
        let id = TaskId::new("direct");
        store
            .insert(&Task::pending(id.clone(), "https://example.com"))
            .await
            .unwrap();

        assert!(store.mark_processing(&id).await.unwrap());
        assert!(store.claim_pending(10, Duration::ZERO).await.unwrap().is_empty());
    }
}
