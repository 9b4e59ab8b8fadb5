//! Worker execution loop

use crate::channel::ResultSender;
use crate::error::{BenchError, BenchResult};
use crate::executor::RequestExecutor;
use crate::task::TaskSource;

use super::stats::WorkerStats;

use std::sync::Arc;

/// Worker drains the task source: claim -> yield -> fetch -> report -> repeat
///
/// Workers are tokio tasks managed by the [`WorkerPool`](crate::pool::WorkerPool).
/// They share the task source and the executor via `Arc` and push results
/// through an unbounded mpsc channel.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// Request executor (shared client inside)
    executor: RequestExecutor,

    /// Task source shared with every other worker of the run
    tasks: Arc<TaskSource>,

    /// Channel sender for request results
    results_tx: ResultSender,
}

impl Worker {
    /// Create a new worker
    pub fn new(
        id: usize,
        executor: RequestExecutor,
        tasks: Arc<TaskSource>,
        results_tx: ResultSender,
    ) -> Self {
        Self {
            id,
            executor,
            tasks,
            results_tx,
        }
    }

    /// Run the worker loop until the task source is exhausted
    ///
    /// Returns an error only if the results channel was closed, since a
    /// result that cannot be delivered would be silently lost.
    pub async fn run(self) -> BenchResult<WorkerStats> {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(worker_id = self.id, "Worker started");

        while let Some(task) = self.tasks.claim() {
            // Fairness point: let other workers claim before we go to the network.
            tokio::task::yield_now().await;

            let result = self.executor.fetch(&task.url).await;
            stats.record(&result);

            tracing::trace!(
                worker_id = self.id,
                task = task.index,
                status = result.status_code(),
                elapsed_secs = result.elapsed_seconds(),
                "Task finished"
            );

            if self.results_tx.send(result).is_err() {
                tracing::debug!(worker_id = self.id, "Results channel closed");
                return Err(BenchError::pool(format!(
                    "worker {}: results channel closed before task {} was reported",
                    self.id, task.index
                )));
            }
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            completed = stats.completed,
            failed = stats.failed(),
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        Ok(stats)
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("executor", &self.executor)
            .field("remaining_tasks", &self.tasks.remaining())
            .finish()
    }
}
