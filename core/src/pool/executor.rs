//! Worker pool execution logic

use std::sync::Arc;
use std::time::Instant;

use crate::channel::ResultSender;
use crate::error::{BenchError, BenchResult};
use crate::executor::RequestExecutor;
use crate::task::TaskSource;
use crate::worker::WorkerBuilder;

use super::aggregator::{aggregate_worker_stats, PoolSummary};

/// Runs `concurrency` workers over a task source
///
/// Responsible for spawning workers, joining them, and summarising
/// per-worker statistics. Results travel through the channel created by
/// [`WorkerPoolBuilder`](super::WorkerPoolBuilder).
pub struct WorkerPool {
    /// Number of workers to spawn
    pub(crate) concurrency: usize,

    /// Executor shared by every worker
    pub(crate) executor: RequestExecutor,

    /// Results sender (cloned for each worker)
    pub(crate) results_tx: ResultSender,
}

impl WorkerPool {
    /// Create a new pool
    ///
    /// Use `WorkerPoolBuilder` for a more ergonomic construction.
    pub fn new(concurrency: usize, executor: RequestExecutor, results_tx: ResultSender) -> Self {
        Self {
            concurrency,
            executor,
            results_tx,
        }
    }

    /// Drain the task source
    ///
    /// Consumes the (already populated) task source, spawns the workers and
    /// waits for every one of them. Fails if any worker failed or panicked,
    /// since its remaining results would be missing from the run.
    pub async fn run(&self, tasks: TaskSource) -> BenchResult<PoolSummary> {
        let start = Instant::now();
        let scheduled = tasks.len();
        let tasks = Arc::new(tasks);
        let mut handles = Vec::with_capacity(self.concurrency);

        tracing::info!(
            concurrency = self.concurrency,
            scheduled,
            "Starting workers"
        );

        for worker_id in 0..self.concurrency {
            let worker = WorkerBuilder::new(worker_id)
                .executor(self.executor.clone())
                .tasks(Arc::clone(&tasks))
                .results_tx(self.results_tx.clone())
                .build()?;

            handles.push(tokio::spawn(worker.run()));
        }

        // Wait for all workers to complete
        let mut results = Vec::with_capacity(handles.len());
        let mut worker_failures = 0;
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(stats)) => {
                    tracing::debug!(
                        worker_id = idx,
                        completed = stats.completed,
                        failed = stats.failed(),
                        "Worker completed"
                    );
                    results.push(stats);
                }
                Ok(Err(e)) => {
                    worker_failures += 1;
                    tracing::error!(worker_id = idx, error = %e, "Worker returned error");
                }
                Err(e) => {
                    worker_failures += 1;
                    tracing::error!(worker_id = idx, error = %e, "Worker task panicked");
                }
            }
        }

        if worker_failures > 0 {
            return Err(BenchError::pool(format!(
                "{} of {} workers failed to complete",
                worker_failures, self.concurrency
            )));
        }

        let summary = aggregate_worker_stats(&results);
        tracing::info!(
            elapsed_secs = start.elapsed().as_secs_f64(),
            completed = summary.total_completed,
            failed = summary.total_failed,
            idle_workers = summary.idle_workers,
            rps = summary.requests_per_second,
            "Workers finished"
        );

        Ok(summary)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("concurrency", &self.concurrency)
            .field("executor", &self.executor)
            .finish()
    }
}
