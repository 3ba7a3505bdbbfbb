//! Worker pool and store poller.
//!
//! ```text
//! Poller ──claim_pending──► mpsc ──► TaskRunner ──► TaskManager::process
//!                                     (≤ concurrency at once)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let (tx, rx) = tokio::sync::mpsc::channel(64);
//! let runner = TaskRunner::new(manager.clone(), 4);
//! let poller = Poller::new(store, PollerConfig::default());
//!
//! tokio::spawn(poller.run(tx, shutdown.clone()));
//! runner.run(rx).await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::manager::TaskManager;
use crate::traits::store::TaskStore;
use crate::types::task::TaskRequest;

/// Executes queued task requests with bounded concurrency.
pub struct TaskRunner {
    manager: Arc<TaskManager>,
    concurrency: usize,
}

impl TaskRunner {
    pub fn new(manager: Arc<TaskManager>, concurrency: usize) -> Self {
        Self {
            manager,
            concurrency: concurrency.max(1),
        }
    }

    /// Consume requests until the channel closes, then drain in-flight tasks.
    ///
    /// Returns the number of tasks that reached a terminal commit.
    pub async fn run(self, mut requests: mpsc::Receiver<TaskRequest>) -> usize {
        info!(concurrency = self.concurrency, "task runner starting");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut in_flight = JoinSet::new();
        let mut committed = 0usize;

        while let Some(request) = requests.recv().await {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let manager = self.manager.clone();

            debug!(task_id = %request.task_id, "dispatching task");
            in_flight.spawn(async move {
                let _permit = permit;
                match manager.process(&request.task_id, &request.url).await {
                    Ok(_) => true,
                    Err(e) => {
                        error!(task_id = %request.task_id, error = %e, "failed to record task outcome");
                        false
                    }
                }
            });

            while let Some(done) = in_flight.try_join_next() {
                committed += usize::from(joined(done));
            }
        }

        while let Some(done) = in_flight.join_next().await {
            committed += usize::from(joined(done));
        }

        info!(committed, "task runner stopped");
        committed
    }
}

fn joined(result: Result<bool, tokio::task::JoinError>) -> bool {
    match result {
        Ok(committed) => committed,
        Err(e) => {
            error!(error = %e, "task panicked");
            false
        }
    }
}

/// Configuration for the store poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Maximum number of tasks to claim at once
    pub batch_size: usize,
    /// How long to wait when no tasks are pending
    pub poll_interval: Duration,
    /// How long a claimed task may stay uncommitted before another poll
    /// reclaims it. Must exceed the slowest task (two model calls plus fetches).
    pub lease_duration: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            poll_interval: Duration::from_secs(5),
            lease_duration: Duration::from_secs(600),
        }
    }
}

/// Claims pending tasks from the store and feeds them to a runner.
pub struct Poller {
    store: Arc<dyn TaskStore>,
    config: PollerConfig,
}

impl Poller {
    pub fn new(store: Arc<dyn TaskStore>, config: PollerConfig) -> Self {
        Self { store, config }
    }

    /// Poll until cancelled or the runner hangs up. Dropping `requests` on
    /// return lets the runner drain and stop.
    pub async fn run(self, requests: mpsc::Sender<TaskRequest>, shutdown: CancellationToken) {
        info!(
            batch_size = self.config.batch_size,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            lease_secs = self.config.lease_duration.as_secs(),
            "poller starting"
        );

        while !shutdown.is_cancelled() {
            let claimed = match self
                .store
                .claim_pending(self.config.batch_size, self.config.lease_duration)
                .await
            {
                Ok(claimed) => claimed,
                Err(e) => {
                    error!(error = %e, "failed to claim tasks");
                    if sleep_or_cancel(Duration::from_secs(1), &shutdown).await {
                        break;
                    }
                    continue;
                }
            };

            if claimed.is_empty() {
                if sleep_or_cancel(self.config.poll_interval, &shutdown).await {
                    break;
                }
                continue;
            }

            debug!(count = claimed.len(), "claimed tasks");
            for request in claimed {
                if requests.send(request).await.is_err() {
                    info!("runner closed, poller stopping");
                    return;
                }
            }
        }

        info!("poller stopped");
    }
}

/// Returns `true` when cancelled before the sleep finished.
async fn sleep_or_cancel(duration: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}
