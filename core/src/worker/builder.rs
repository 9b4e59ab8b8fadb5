//! Builder pattern for Worker construction

use crate::channel::ResultSender;
use crate::error::{BenchError, BenchResult};
use crate::executor::RequestExecutor;
use crate::task::TaskSource;

use super::executor::Worker;

use std::sync::Arc;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .executor(executor)
///     .tasks(tasks)
///     .results_tx(tx)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    executor: Option<RequestExecutor>,
    tasks: Option<Arc<TaskSource>>,
    results_tx: Option<ResultSender>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            executor: None,
            tasks: None,
            results_tx: None,
        }
    }

    /// Set the request executor
    pub fn executor(mut self, executor: RequestExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Set the shared task source
    pub fn tasks(mut self, tasks: Arc<TaskSource>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Set the results channel sender
    pub fn results_tx(mut self, tx: ResultSender) -> Self {
        self.results_tx = Some(tx);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let executor = self
            .executor
            .ok_or(BenchError::missing_config("executor"))?;
        let tasks = self.tasks.ok_or(BenchError::missing_config("tasks"))?;
        let results_tx = self
            .results_tx
            .ok_or(BenchError::missing_config("results_tx"))?;

        Ok(Worker::new(self.id, executor, tasks, results_tx))
    }
}
