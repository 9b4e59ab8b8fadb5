//! Summary of per-worker statistics

use serde::Serialize;
use std::time::Duration;

use crate::worker::WorkerStats;

/// Aggregated statistics from all workers of a pool run
///
/// Shows how evenly the task source was drained: idle workers and the
/// busiest worker's share.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoolSummary {
    /// Number of workers that completed
    pub total_workers: usize,

    /// Workers that never claimed a task
    pub idle_workers: usize,

    /// Most requests executed by a single worker
    pub busiest_worker_requests: usize,

    /// Total requests answered with `200 OK`
    pub total_completed: usize,

    /// Total requests counted as failed
    pub total_failed: usize,

    /// Total body bytes received
    pub total_bytes: usize,

    /// Requests per second over the longest-running worker's lifetime
    pub requests_per_second: f64,
}

/// Aggregate statistics from multiple workers
pub fn aggregate_worker_stats(stats: &[WorkerStats]) -> PoolSummary {
    if stats.is_empty() {
        return PoolSummary::default();
    }

    let mut merged = WorkerStats::new();
    for s in stats {
        merged.merge(s);
    }

    let idle_workers = stats.iter().filter(|s| s.total_requests() == 0).count();
    let busiest_worker_requests = stats
        .iter()
        .map(WorkerStats::total_requests)
        .max()
        .unwrap_or(0);

    // The slowest worker bounds the pool's lifetime
    let longest = stats
        .iter()
        .filter_map(|s| s.elapsed())
        .max()
        .unwrap_or(Duration::ZERO);

    let secs = longest.as_secs_f64();
    let requests_per_second = if secs > 0.0 {
        merged.total_requests() as f64 / secs
    } else {
        0.0
    };

    PoolSummary {
        total_workers: stats.len(),
        idle_workers,
        busiest_worker_requests,
        total_completed: merged.completed,
        total_failed: merged.failed(),
        total_bytes: merged.bytes_received,
        requests_per_second,
    }
}
