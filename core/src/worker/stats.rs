//! Worker statistics tracking

use crate::result::RequestResult;
use std::time::Instant;

/// Statistics tracked by each worker
#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    /// Requests answered with `200 OK`
    pub completed: usize,

    /// Requests answered with any other status
    pub non_ok: usize,

    /// Requests that never got a response
    pub transport_failures: usize,

    /// Total body bytes received
    pub bytes_received: usize,

    /// Worker start time
    pub started_at: Option<Instant>,

    /// Worker end time
    pub ended_at: Option<Instant>,
}

impl WorkerStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking (records start time)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time)
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Count one finished request
    pub fn record(&mut self, result: &RequestResult) {
        if result.is_ok() {
            self.completed += 1;
        } else if result.is_transport_failure() {
            self.transport_failures += 1;
        } else {
            self.non_ok += 1;
        }
        self.bytes_received += result.body_size();
    }

    /// Requests counted as failed (every non-200 outcome)
    pub fn failed(&self) -> usize {
        self.non_ok + self.transport_failures
    }

    /// Get total number of requests this worker executed
    pub fn total_requests(&self) -> usize {
        self.completed + self.failed()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<std::time::Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }

    /// Merge stats from another worker
    pub fn merge(&mut self, other: &WorkerStats) {
        self.completed += other.completed;
        self.non_ok += other.non_ok;
        self.transport_failures += other.transport_failures;
        self.bytes_received += other.bytes_received;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::time::Duration;

    #[test]
    fn test_worker_stats_defaults() {
        let stats = WorkerStats::default();
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.failed(), 0);
        assert_eq!(stats.bytes_received, 0);
        assert!(stats.started_at.is_none());
        assert!(stats.ended_at.is_none());
    }

    #[test]
    fn test_worker_stats_record() {
        let mut stats = WorkerStats::new();
        stats.record(&RequestResult::success(Duration::from_millis(1), 100, 200));
        stats.record(&RequestResult::success(Duration::from_millis(1), 20, 404));
        stats.record(&RequestResult::failure(ErrorKind::Timeout));

        assert_eq!(stats.completed, 1);
        assert_eq!(stats.non_ok, 1);
        assert_eq!(stats.transport_failures, 1);
        assert_eq!(stats.failed(), 2);
        assert_eq!(stats.total_requests(), 3);
        assert_eq!(stats.bytes_received, 120);
    }

    #[test]
    fn test_worker_stats_merge() {
        let mut stats1 = WorkerStats::new();
        stats1.completed = 10;
        stats1.non_ok = 1;
        stats1.bytes_received = 1000;

        let mut stats2 = WorkerStats::new();
        stats2.completed = 5;
        stats2.transport_failures = 2;
        stats2.bytes_received = 500;

        stats1.merge(&stats2);

        assert_eq!(stats1.completed, 15);
        assert_eq!(stats1.failed(), 3);
        assert_eq!(stats1.bytes_received, 1500);
    }

    #[test]
    fn test_worker_stats_start_stop() {
        let mut stats = WorkerStats::new();
        assert!(stats.elapsed().is_none());

        stats.start();
        assert!(stats.started_at.is_some());
        assert!(stats.elapsed().is_some());

        std::thread::sleep(Duration::from_millis(10));
        stats.stop();

        let elapsed = stats.elapsed().unwrap();
        assert!(elapsed >= Duration::from_millis(10));
    }
}
