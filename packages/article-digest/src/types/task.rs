//! Task records and the partial updates the lifecycle manager commits.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PipelineError;

/// Title a task carries until extraction resolves a real one.
pub const PLACEHOLDER_TITLE: &str = "Processing...";

/// Opaque task identifier, matching the store's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap an identifier issued elsewhere.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Issue a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle status.
///
/// `pending → processing → completed | failed`. Terminal states are only ever
/// overwritten by another terminal commit for the same task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "processing" => Ok(TaskStatus::Processing),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(format!("unknown task status: {}", other)),
        }
    }
}

/// A tracked article-processing task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub url: String,
    pub status: TaskStatus,
    pub title: String,

    /// Formatted summary on success, `"Error: ..."` on failure, empty before either
    pub summary: String,

    /// Topic labels on success, empty otherwise
    pub topics: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A freshly submitted task in the `pending` state.
    pub fn pending(id: TaskId, url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            url: url.into(),
            status: TaskStatus::Pending,
            title: PLACEHOLDER_TITLE.to_string(),
            summary: String::new(),
            topics: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a terminal commit into this record.
    ///
    /// A failed commit only touches `status` and `summary`.
    pub fn apply(&mut self, commit: &TaskCommit) {
        match commit {
            TaskCommit::Completed {
                title,
                summary,
                topics,
            } => {
                self.title = title.clone();
                self.summary = summary.clone();
                self.topics = topics.clone();
            }
            TaskCommit::Failed { summary } => {
                self.summary = summary.clone();
            }
        }
        self.status = commit.status();
        self.updated_at = Utc::now();
    }
}

/// Unit of work handed to the lifecycle manager by the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub task_id: TaskId,
    pub url: String,
}

impl TaskRequest {
    pub fn new(task_id: impl Into<TaskId>, url: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            url: url.into(),
        }
    }
}

/// The single terminal write a lifecycle run performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaskCommit {
    Completed {
        title: String,
        summary: String,
        topics: Vec<String>,
    },
    Failed {
        summary: String,
    },
}

impl TaskCommit {
    /// Failure commit carrying `"Error: <message>"`.
    pub fn failed(err: &PipelineError) -> Self {
        TaskCommit::Failed {
            summary: format!("Error: {}", err),
        }
    }

    pub fn status(&self) -> TaskStatus {
        match self {
            TaskCommit::Completed { .. } => TaskStatus::Completed,
            TaskCommit::Failed { .. } => TaskStatus::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_pending_task_defaults() {
        let task = Task::pending(TaskId::new("abc"), "https://example.com");

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.title, PLACEHOLDER_TITLE);
        assert!(task.summary.is_empty());
        assert!(task.topics.is_empty());
    }

    #[test]
    fn test_failed_commit_keeps_title_and_topics() {
        let mut task = Task::pending(TaskId::new("abc"), "https://example.com");
        task.apply(&TaskCommit::failed(&ValidationError::ContentEmpty.into()));

        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(task.summary, "Error: content appears empty");
        assert_eq!(task.title, PLACEHOLDER_TITLE);
        assert!(task.topics.is_empty());
    }

    #[test]
    fn test_completed_commit_overwrites_failure() {
        let mut task = Task::pending(TaskId::new("abc"), "https://example.com");
        task.apply(&TaskCommit::Failed {
            summary: "Error: first".into(),
        });
        task.apply(&TaskCommit::Completed {
            title: "Title".into(),
            summary: "Summary".into(),
            topics: vec!["Tech".into(), "AI".into()],
        });

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.summary, "Summary");
        assert_eq!(task.topics, vec!["Tech", "AI"]);
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::Processing,
            TaskStatus::Completed,
            TaskStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }
}
