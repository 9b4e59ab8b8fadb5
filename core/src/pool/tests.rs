//! Tests for the WorkerPool module

use super::aggregator::{aggregate_worker_stats, PoolSummary};
use super::builder::WorkerPoolBuilder;
use crate::error::BenchError;
use crate::result::FAILED_STATUS;
use crate::task::{TaskSource, UrlSet};
use crate::traits::{FetchError, HttpClient, HttpResponse};
use crate::worker::WorkerStats;

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ============================================================================
// Mock HttpClient
// ============================================================================

struct MockClient {
    delay: Option<Duration>,
    always_fail: bool,
    counter: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockClient {
    fn new() -> Self {
        Self {
            delay: None,
            always_fail: false,
            counter: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn failing(mut self) -> Self {
        self.always_fail = true;
        self
    }
}

#[async_trait]
impl HttpClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        // Each response body encodes the call number so results are distinguishable.
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.always_fail {
            return Err(FetchError::Timeout(Duration::from_secs(1)));
        }
        Ok(HttpResponse::new(200, count + 1))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_pool_summary_default() {
    let summary = PoolSummary::default();
    assert_eq!(summary.total_workers, 0);
    assert_eq!(summary.idle_workers, 0);
    assert_eq!(summary.requests_per_second, 0.0);
}

#[test]
fn test_aggregate_worker_stats_empty() {
    let summary = aggregate_worker_stats(&[]);
    assert_eq!(summary.total_workers, 0);
    assert_eq!(summary.total_completed, 0);
}

#[test]
fn test_aggregate_worker_stats() {
    let mut s1 = WorkerStats::new();
    s1.completed = 50;
    s1.non_ok = 5;
    s1.bytes_received = 5000;
    s1.start();
    std::thread::sleep(Duration::from_millis(10));
    s1.stop();

    let mut s2 = WorkerStats::new();
    s2.completed = 40;
    s2.transport_failures = 5;
    s2.bytes_received = 4000;
    s2.start();
    std::thread::sleep(Duration::from_millis(10));
    s2.stop();

    let idle = WorkerStats::new();

    let summary = aggregate_worker_stats(&[s1, s2, idle]);
    assert_eq!(summary.total_workers, 3);
    assert_eq!(summary.idle_workers, 1);
    assert_eq!(summary.busiest_worker_requests, 55);
    assert_eq!(summary.total_completed, 90);
    assert_eq!(summary.total_failed, 10);
    assert_eq!(summary.total_bytes, 9000);
    // 100 requests over at least 10ms
    assert!(summary.requests_per_second > 0.0);
    assert!(summary.requests_per_second <= 10_000.0);
}

#[test]
fn test_builder_missing_client() {
    let err = WorkerPoolBuilder::new().concurrency(2).build().unwrap_err();
    assert!(matches!(err, BenchError::MissingConfig("client")));
}

#[test]
fn test_builder_zero_concurrency() {
    let err = WorkerPoolBuilder::new()
        .client(Arc::new(MockClient::new()))
        .concurrency(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, BenchError::Config(_)));
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_pool_runs_every_task_once() {
    let client = Arc::new(MockClient::new());
    let (pool, mut results) = WorkerPoolBuilder::new()
        .client(client.clone())
        .concurrency(3)
        .build()
        .expect("Failed to build pool");

    let summary = pool
        .run(TaskSource::populate(&UrlSet::from("http://a/"), 10))
        .await
        .expect("Run failed");

    assert_eq!(summary.total_workers, 3);
    assert_eq!(summary.total_completed + summary.total_failed, 10);
    // body sizes are call numbers 1..=10
    assert_eq!(summary.total_bytes, 55);
    assert_eq!(results.drain().len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_high_concurrency_no_lost_or_duplicate_results() {
    let client = Arc::new(MockClient::new().with_delay(Duration::from_millis(1)));
    let (pool, mut results) = WorkerPoolBuilder::new()
        .client(client.clone())
        .concurrency(50)
        .build()
        .expect("Failed to build pool");

    pool.run(TaskSource::populate(&UrlSet::from("http://a/"), 1000))
        .await
        .expect("Run failed");

    let collected = results.drain();
    assert_eq!(collected.len(), 1000);

    let distinct: HashSet<usize> = collected.iter().map(|r| r.body_size()).collect();
    assert_eq!(distinct.len(), 1000);
    assert_eq!(client.counter.load(Ordering::SeqCst), 1000);
}

#[tokio::test]
async fn test_pool_cycles_urls() {
    let client = Arc::new(MockClient::new().with_delay(Duration::from_millis(1)));
    let (pool, _results) = WorkerPoolBuilder::new()
        .client(client.clone())
        .concurrency(3)
        .build()
        .expect("Failed to build pool");

    let urls = UrlSet::from(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    pool.run(TaskSource::populate(&urls, 7)).await.expect("Run failed");

    let mut seen = client.seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen, vec!["a", "a", "a", "b", "b", "c", "c"]);
}

#[tokio::test]
async fn test_pool_more_workers_than_tasks() {
    let client = Arc::new(MockClient::new());
    let (pool, mut results) = WorkerPoolBuilder::new()
        .client(client)
        .concurrency(8)
        .build()
        .expect("Failed to build pool");

    let summary = pool
        .run(TaskSource::populate(&UrlSet::from("http://a/"), 3))
        .await
        .expect("Run failed");

    assert_eq!(summary.total_workers, 8);
    assert_eq!(summary.total_completed, 3);
    assert!(summary.idle_workers >= 5);
    assert!(summary.busiest_worker_requests >= 1);
    assert_eq!(results.drain().len(), 3);
}

#[tokio::test]
async fn test_pool_empty_task_source() {
    let client = Arc::new(MockClient::new());
    let (pool, mut results) = WorkerPoolBuilder::new()
        .client(client.clone())
        .concurrency(4)
        .build()
        .expect("Failed to build pool");

    let summary = pool
        .run(TaskSource::populate(&UrlSet::List(Vec::new()), 5))
        .await
        .expect("Run failed");

    assert_eq!(summary.total_workers, 4);
    assert_eq!(summary.idle_workers, 4);
    assert!(results.drain().is_empty());
    assert_eq!(client.counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_pool_all_failures_still_yield_results() {
    let client = Arc::new(MockClient::new().failing());
    let (pool, mut results) = WorkerPoolBuilder::new()
        .client(client)
        .concurrency(2)
        .build()
        .expect("Failed to build pool");

    pool.run(TaskSource::populate(&UrlSet::from("http://a/"), 6))
        .await
        .expect("Run failed");

    let collected = results.drain();
    assert_eq!(collected.len(), 6);
    assert!(collected.iter().all(|r| r.status_code() == FAILED_STATUS));
}

#[tokio::test]
async fn test_pool_requests_run_concurrently() {
    let client = Arc::new(MockClient::new().with_delay(Duration::from_millis(50)));
    let (pool, _results) = WorkerPoolBuilder::new()
        .client(client.clone())
        .concurrency(5)
        .build()
        .expect("Failed to build pool");

    let start = Instant::now();
    pool.run(TaskSource::populate(&UrlSet::from("http://a/"), 10))
        .await
        .expect("Run failed");
    let elapsed = start.elapsed();

    // 10 requests at 50ms each over 5 workers: two waves, far below serial time
    assert!(elapsed < Duration::from_millis(400));
    assert!(client.peak_in_flight.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_pool_debug_format() {
    let (pool, _rx) = WorkerPoolBuilder::new()
        .client(Arc::new(MockClient::new()))
        .concurrency(2)
        .build()
        .expect("Failed to build");

    let debug = format!("{:?}", pool);
    assert!(debug.contains("WorkerPool"));
    assert!(debug.contains("mock"));
}
