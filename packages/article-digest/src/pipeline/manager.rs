//! Task lifecycle: classify, extract, validate, enrich, commit.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::enrich::Enricher;
use super::validate::validate_content;
use crate::classify::classify;
use crate::error::{PipelineError, StoreResult};
use crate::strategies::Extractor;
use crate::traits::store::TaskStore;
use crate::types::config::ValidationConfig;
use crate::types::task::{TaskCommit, TaskId, TaskStatus};

/// What a lifecycle run committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task_id: TaskId,
    pub commit: TaskCommit,
}

impl TaskOutcome {
    pub fn status(&self) -> TaskStatus {
        self.commit.status()
    }
}

/// Owns the task state machine and is the only writer of task records.
pub struct TaskManager {
    store: Arc<dyn TaskStore>,
    extractor: Extractor,
    enricher: Enricher,
    validation: ValidationConfig,
}

impl TaskManager {
    pub fn new(store: Arc<dyn TaskStore>, extractor: Extractor, enricher: Enricher) -> Self {
        Self {
            store,
            extractor,
            enricher,
            validation: ValidationConfig::default(),
        }
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// Run one task to a terminal commit.
    ///
    /// Business failures are recorded on the task and still return `Ok`.
    /// Only store failures are returned as `Err`, so the caller's retry
    /// policy sees them.
    #[instrument(skip_all, fields(task_id = %task_id, url = %url))]
    pub async fn process(&self, task_id: &TaskId, url: &str) -> StoreResult<TaskOutcome> {
        if !self.store.mark_processing(task_id).await? {
            debug!("Task was not pending, running anyway");
        }

        let commit = match self.run_pipeline(url).await {
            Ok(commit) => {
                info!("Task completed");
                commit
            }
            Err(e) => {
                warn!(error = %e, "Task failed");
                TaskCommit::failed(&e)
            }
        };

        self.store.commit(task_id, &commit).await?;

        Ok(TaskOutcome {
            task_id: task_id.clone(),
            commit,
        })
    }

    async fn run_pipeline(&self, url: &str) -> Result<TaskCommit, PipelineError> {
        let kind = classify(url);
        info!(source = kind.label(), "Extracting");

        let extracted = self.extractor.extract(&kind, url).await?;
        debug!(title = %extracted.title, chars = extracted.char_len(), "Extracted");

        let text = validate_content(Some(&extracted.text), &self.validation)?;

        let enriched = self.enricher.enrich(&text).await?;

        Ok(TaskCommit::Completed {
            title: extracted.title,
            summary: enriched.summary,
            topics: enriched.topics,
        })
    }
}
