//! Builder pattern for WorkerPool construction

use std::sync::Arc;

use crate::channel::{result_channel, ResultReceiver};
use crate::error::{BenchError, BenchResult};
use crate::executor::RequestExecutor;
use crate::traits::HttpClient;

use super::executor::WorkerPool;

/// Builder for creating a WorkerPool together with its results channel
///
/// # Example
///
/// ```ignore
/// let (pool, results) = WorkerPoolBuilder::new()
///     .concurrency(10)
///     .client(client)
///     .build()?;
/// ```
pub struct WorkerPoolBuilder {
    concurrency: usize,
    client: Option<Arc<dyn HttpClient>>,
}

impl WorkerPoolBuilder {
    /// Create a new builder with a single worker
    pub fn new() -> Self {
        Self {
            concurrency: 1,
            client: None,
        }
    }

    /// Set the number of workers
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the HTTP client shared by every worker
    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the pool and return it along with the results receiver
    ///
    /// # Errors
    ///
    /// Returns an error if no client is set or concurrency is zero.
    pub fn build(self) -> BenchResult<(WorkerPool, ResultReceiver)> {
        let client = self
            .client
            .ok_or_else(|| BenchError::missing_config("client"))?;

        if self.concurrency == 0 {
            return Err(BenchError::config("concurrency must be at least 1"));
        }

        let (results_tx, results_rx) = result_channel();
        let pool = WorkerPool::new(self.concurrency, RequestExecutor::new(client), results_tx);

        Ok((pool, results_rx))
    }
}

impl Default for WorkerPoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
