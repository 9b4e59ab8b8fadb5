//! Aggregate statistics over a completed run
//!
//! Everything here is computed from the collected [`RequestResult`]s after
//! the worker pool has been joined. Derived metrics take `&self` and never
//! reorder or mutate the stored results.

use crate::result::RequestResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Percentile ranks reported by [`ResultStats::distribution`]
pub const DISTRIBUTION_PERCENTILES: [u8; 9] = [50, 66, 75, 80, 90, 95, 98, 99, 100];

/// Bias applied to the percentile index so exact matches land on the lower rank
const PERCENTILE_EPSILON: f64 = 0.001;

/// Results of one run plus its wall-clock timing
#[derive(Debug, Clone)]
pub struct ResultStats {
    results: Vec<RequestResult>,
    start_time: Instant,
    total_wall_time: Option<Duration>,
}

impl ResultStats {
    /// Start collecting; the wall clock starts now
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            start_time: Instant::now(),
            total_wall_time: None,
        }
    }

    /// Build stats from already collected results and a known wall time
    pub fn from_results(results: Vec<RequestResult>, total_wall_time: Duration) -> Self {
        Self {
            results,
            start_time: Instant::now(),
            total_wall_time: Some(total_wall_time),
        }
    }

    /// Append a batch of results
    pub fn extend(&mut self, results: impl IntoIterator<Item = RequestResult>) {
        self.results.extend(results);
    }

    /// Stop the wall clock
    ///
    /// Only the first call has an effect.
    pub fn stop(&mut self) {
        if self.total_wall_time.is_none() {
            self.total_wall_time = Some(self.start_time.elapsed());
        }
    }

    /// Number of collected results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if nothing was collected
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Wall-clock duration of the run in seconds, once stopped
    pub fn total_wall_time(&self) -> Option<f64> {
        self.total_wall_time.map(|d| d.as_secs_f64())
    }

    /// Results whose status is anything but `200` (transport failures included)
    pub fn failed_requests(&self) -> usize {
        self.results.iter().filter(|r| !r.is_ok()).count()
    }

    /// Results answered with `200`
    pub fn complete_requests(&self) -> usize {
        self.len() - self.failed_requests()
    }

    /// Sum of elapsed seconds
    pub fn total_req_time(&self) -> f64 {
        self.results.iter().map(RequestResult::elapsed_seconds).sum()
    }

    /// Mean elapsed seconds, `None` without results
    pub fn avg_req_time(&self) -> Option<f64> {
        self.per_result(self.total_req_time())
    }

    /// Sum of body sizes in bytes
    pub fn total_req_length(&self) -> usize {
        self.results.iter().map(RequestResult::body_size).sum()
    }

    /// Mean body size in bytes, `None` without results
    pub fn avg_req_length(&self) -> Option<f64> {
        self.per_result(self.total_req_length() as f64)
    }

    /// Results per wall-clock second
    pub fn requests_per_second(&self) -> Option<f64> {
        self.per_wall_second(self.len() as f64)
    }

    /// Mean request time divided by the concurrency level
    pub fn time_per_request_across(&self, concurrency: usize) -> Option<f64> {
        if concurrency == 0 {
            return None;
        }
        self.avg_req_time().map(|avg| avg / concurrency as f64)
    }

    /// Received Kbytes per wall-clock second
    pub fn transfer_rate_kbytes(&self) -> Option<f64> {
        self.per_wall_second(self.total_req_length() as f64)
            .map(|bytes| bytes / 1024.0)
    }

    /// Count of results per status code (`-1` for transport failures)
    pub fn status_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for result in &self.results {
            *counts.entry(result.status_code()).or_insert(0) += 1;
        }
        counts
    }

    /// Elapsed time at each rank of [`DISTRIBUTION_PERCENTILES`]
    ///
    /// Returns `(percentile, seconds)` pairs; empty when there are no results.
    pub fn distribution(&self) -> Vec<(u8, f64)> {
        let sorted = sorted(self.results.iter().map(RequestResult::elapsed_seconds));
        let n = sorted.len();
        if n == 0 {
            return Vec::new();
        }

        DISTRIBUTION_PERCENTILES
            .iter()
            .map(|&p| {
                let index = if p == 100 {
                    n - 1
                } else {
                    percentile_index(p, n)
                };
                (p, sorted[index])
            })
            .collect()
    }

    /// Per-phase timing summary
    ///
    /// `None` unless at least one result carries a phase breakdown. Only
    /// results with a breakdown contribute, so every phase (including the
    /// total) is summarised over the same set of requests.
    pub fn connection_times(&self) -> Option<ConnectionTimes> {
        let detailed: Vec<_> = self
            .results
            .iter()
            .filter_map(|r| r.detail_time().map(|d| (d, r.elapsed_seconds())))
            .collect();
        if detailed.is_empty() {
            return None;
        }

        let connect: Vec<f64> = detailed.iter().map(|(d, _)| d.connect).collect();
        let process: Vec<f64> = detailed.iter().map(|(d, _)| d.process).collect();
        let wait: Vec<f64> = detailed.iter().map(|(d, _)| d.wait).collect();
        let total: Vec<f64> = detailed.iter().map(|(_, elapsed)| *elapsed).collect();

        Some(ConnectionTimes {
            connect: PhaseStats::from_values(&connect)?,
            process: PhaseStats::from_values(&process)?,
            wait: PhaseStats::from_values(&wait)?,
            total: PhaseStats::from_values(&total)?,
        })
    }

    fn per_result(&self, total: f64) -> Option<f64> {
        if self.results.is_empty() {
            None
        } else {
            Some(total / self.results.len() as f64)
        }
    }

    fn per_wall_second(&self, amount: f64) -> Option<f64> {
        match self.total_wall_time() {
            Some(secs) if secs > 0.0 => Some(amount / secs),
            _ => None,
        }
    }
}

impl Default for ResultStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Index into `n` sorted values for percentile `p`
///
/// `floor(p/100 * n - 0.001)`, clamped to `[0, n-1]`.
pub fn percentile_index(p: u8, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let i = f64::from(p) / 100.0 * n as f64 - PERCENTILE_EPSILON;
    if i >= n as f64 {
        n - 1
    } else {
        i.floor().max(0.0) as usize
    }
}

/// `(min, mean, sample std-dev, median, max)` of one connection phase, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseStats {
    /// Smallest value
    pub min: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Upper-middle element of the sorted values
    pub median: f64,
    /// Largest value
    pub max: f64,
}

impl PhaseStats {
    /// Summarise a non-empty set of values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values.iter().copied());
        Some(Self {
            min: *sorted.first()?,
            mean: mean(values)?,
            std_dev: std_deviation(values),
            median: median(values)?,
            max: *sorted.last()?,
        })
    }
}

/// Connection-phase breakdown across a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTimes {
    /// Connection establishment
    pub connect: PhaseStats,
    /// Server processing
    pub process: PhaseStats,
    /// Waiting for the response
    pub wait: PhaseStats,
    /// Whole request
    pub total: PhaseStats,
}

impl ConnectionTimes {
    /// Phases in report order with their display names
    pub fn phases(&self) -> [(&'static str, &PhaseStats); 4] {
        [
            ("Connect", &self.connect),
            ("Processing", &self.process),
            ("Waiting", &self.wait),
            ("Total", &self.total),
        ]
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (`n - 1` denominator); 0 for fewer than two values
pub fn std_deviation(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let square_sum: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (square_sum / (n - 1) as f64).sqrt()
}

/// `sorted[n / 2]`: the upper-middle element for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted(values.iter().copied());
    sorted.get(sorted.len() / 2).copied()
}

fn sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}
