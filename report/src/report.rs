//! Run snapshot

use chrono::{DateTime, Utc};
use loadbench_core::{ConnectionTimes, PoolSummary, ResultStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the latency distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileEntry {
    /// Percentile rank (50..=100)
    pub percentile: u8,
    /// Elapsed time at that rank, in seconds
    pub seconds: f64,
}

/// Everything a report needs, computed once from [`ResultStats`]
///
/// Times are in seconds and sizes in bytes. Values that cannot be computed
/// (no results, zero wall time) are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
    /// Number of workers the run used
    pub concurrency: usize,
    /// Results collected
    pub total_requests: usize,
    /// Results that were not failures
    pub complete_requests: usize,
    /// Results with a status other than 200
    pub failed_requests: usize,
    /// Wall-clock duration of the run
    pub total_wall_time: Option<f64>,
    /// Sum of per-request elapsed times
    pub total_req_time: f64,
    /// Mean per-request elapsed time
    pub avg_req_time: Option<f64>,
    /// Mean per-request time divided by concurrency
    pub time_per_request_across: Option<f64>,
    /// Sum of body sizes
    pub total_req_length: usize,
    /// Mean body size
    pub avg_req_length: Option<f64>,
    /// Results per wall-clock second
    pub requests_per_second: Option<f64>,
    /// Received Kbytes per wall-clock second
    pub transfer_rate_kbytes: Option<f64>,
    /// Result count per status code, `-1` for transport failures
    pub status_counts: BTreeMap<i32, usize>,
    /// Latency distribution, empty without results
    pub distribution: Vec<PercentileEntry>,
    /// Per-phase timing, when the client measured it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_times: Option<ConnectionTimes>,
    /// How requests were spread across workers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<PoolSummary>,
}

impl Report {
    /// Snapshot `stats` for a run with `concurrency` workers
    pub fn new(stats: &ResultStats, concurrency: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            concurrency,
            total_requests: stats.len(),
            complete_requests: stats.complete_requests(),
            failed_requests: stats.failed_requests(),
            total_wall_time: stats.total_wall_time(),
            total_req_time: stats.total_req_time(),
            avg_req_time: stats.avg_req_time(),
            time_per_request_across: stats.time_per_request_across(concurrency),
            total_req_length: stats.total_req_length(),
            avg_req_length: stats.avg_req_length(),
            requests_per_second: stats.requests_per_second(),
            transfer_rate_kbytes: stats.transfer_rate_kbytes(),
            status_counts: stats.status_counts(),
            distribution: stats
                .distribution()
                .into_iter()
                .map(|(percentile, seconds)| PercentileEntry {
                    percentile,
                    seconds,
                })
                .collect(),
            connection_times: stats.connection_times(),
            workers: None,
        }
    }

    /// Attach the worker pool's summary
    pub fn with_workers(mut self, workers: PoolSummary) -> Self {
        self.workers = Some(workers);
        self
    }
}
