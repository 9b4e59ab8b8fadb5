//! Run driver: populate, drain, aggregate

use std::sync::Arc;

use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult};
use crate::pool::{PoolSummary, WorkerPoolBuilder};
use crate::stats::ResultStats;
use crate::task::TaskSource;
use crate::traits::HttpClient;

/// Phase of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Configured, not started
    Idle,
    /// Filling the task source
    Populating,
    /// Workers draining the task source
    Draining,
    /// Collecting results and computing statistics
    Aggregating,
    /// Statistics available
    Done,
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    /// Every request's result and the run's wall time
    pub stats: ResultStats,
    /// How the work was spread across workers
    pub workers: PoolSummary,
}

/// One benchmark run
///
/// `run` consumes the benchmark, so a run can neither be repeated nor
/// re-enter population once its workers have started.
pub struct Benchmark {
    config: BenchConfig,
    client: Arc<dyn HttpClient>,
    phase: RunPhase,
}

impl Benchmark {
    /// Create a run, rejecting invalid configuration up front
    pub fn new(config: BenchConfig, client: Arc<dyn HttpClient>) -> BenchResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client,
            phase: RunPhase::Idle,
        })
    }

    /// The run's configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn enter(&mut self, phase: RunPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "Run phase change");
        self.phase = phase;
    }

    /// Execute the run and return its statistics
    pub async fn run(mut self) -> BenchResult<BenchOutcome> {
        let mut stats = ResultStats::new();

        self.enter(RunPhase::Populating);
        let tasks = TaskSource::populate(&self.config.urls, self.config.requests);
        let scheduled = tasks.len();

        self.enter(RunPhase::Draining);
        let (pool, mut results) = WorkerPoolBuilder::new()
            .concurrency(self.config.concurrency)
            .client(Arc::clone(&self.client))
            .build()?;
        let workers = pool.run(tasks).await?;

        self.enter(RunPhase::Aggregating);
        stats.extend(results.drain());
        stats.stop();

        if stats.len() != scheduled {
            return Err(BenchError::pool(format!(
                "collected {} results for {} scheduled requests",
                stats.len(),
                scheduled
            )));
        }

        self.enter(RunPhase::Done);
        tracing::info!(
            requests = stats.len(),
            failed = stats.failed_requests(),
            wall_secs = ?stats.total_wall_time(),
            "Benchmark complete"
        );

        Ok(BenchOutcome { stats, workers })
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("config", &self.config)
            .field("client", &self.client.name())
            .field("phase", &self.phase)
            .finish()
    }
}
