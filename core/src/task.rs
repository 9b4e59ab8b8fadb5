//! Task source: the capped, pre-populated stream of URLs a run fetches

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The target URLs of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlSet {
    /// One URL, repeated for every request
    Single(String),
    /// Several URLs, cycled round-robin
    List(Vec<String>),
}

impl UrlSet {
    /// Number of distinct entries
    pub fn len(&self) -> usize {
        match self {
            UrlSet::Single(_) => 1,
            UrlSet::List(urls) => urls.len(),
        }
    }

    /// True if there is nothing to fetch
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the entries in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let urls: &[String] = match self {
            UrlSet::Single(url) => std::slice::from_ref(url),
            UrlSet::List(urls) => urls,
        };
        urls.iter().map(String::as_str)
    }
}

impl From<&str> for UrlSet {
    fn from(url: &str) -> Self {
        UrlSet::Single(url.to_string())
    }
}

impl From<String> for UrlSet {
    fn from(url: String) -> Self {
        UrlSet::Single(url)
    }
}

impl From<Vec<String>> for UrlSet {
    fn from(urls: Vec<String>) -> Self {
        UrlSet::List(urls)
    }
}

/// One scheduled fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Position in scheduling order
    pub index: usize,
    /// URL to fetch
    pub url: Arc<str>,
}

/// Bounded queue of tasks, filled once and then drained concurrently
///
/// Filling needs `&mut self` while claiming only needs `&self`, so once the
/// source is shared between workers (behind an `Arc`) it can no longer be
/// refilled.
#[derive(Debug)]
pub struct TaskSource {
    tasks: Vec<Task>,
    capacity: usize,
    cursor: AtomicUsize,
}

impl TaskSource {
    /// Create an empty source that accepts at most `capacity` tasks
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: Vec::with_capacity(capacity),
            capacity,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Build a source holding exactly `n` tasks drawn from `urls`
    ///
    /// A single URL is repeated, a list is cycled round-robin. An empty list
    /// yields a source that is exhausted from the start.
    pub fn populate(urls: &UrlSet, n: usize) -> Self {
        let mut source = Self::with_capacity(n);
        let shared: Vec<Arc<str>> = urls.iter().map(Arc::from).collect();

        for url in shared.iter().cycle().take(n) {
            source.offer(Arc::clone(url));
        }

        tracing::debug!(
            distinct_urls = shared.len(),
            scheduled = source.len(),
            "Task source populated"
        );
        source
    }

    /// Enqueue a URL
    ///
    /// Returns `false` and drops the URL when the source is already full.
    pub fn offer(&mut self, url: Arc<str>) -> bool {
        if self.tasks.len() >= self.capacity {
            return false;
        }
        let index = self.tasks.len();
        self.tasks.push(Task { index, url });
        true
    }

    /// Atomically claim the next unclaimed task
    ///
    /// Every task is handed out exactly once across all callers.
    pub fn claim(&self) -> Option<Task> {
        let total = self.tasks.len();
        self.cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next < total).then_some(next + 1)
            })
            .ok()
            .map(|index| self.tasks[index].clone())
    }

    /// Number of tasks scheduled
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Number of tasks not yet claimed
    pub fn remaining(&self) -> usize {
        self.tasks
            .len()
            .saturating_sub(self.cursor.load(Ordering::Acquire))
    }

    /// True once every task has been claimed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
