//! Results channel shared by the workers of one run

use crate::result::RequestResult;
use tokio::sync::mpsc;

/// Sending half, cloned into every worker
pub type ResultSender = mpsc::UnboundedSender<RequestResult>;

/// Receiving half, owned by the driver of the run
///
/// The channel is unbounded so a worker never waits on the collector; the
/// driver drains it once every worker has exited.
#[derive(Debug)]
pub struct ResultReceiver {
    rx: mpsc::UnboundedReceiver<RequestResult>,
}

impl ResultReceiver {
    /// Take every result currently queued, without waiting
    pub fn drain(&mut self) -> Vec<RequestResult> {
        let mut results = Vec::with_capacity(self.rx.len());
        while let Ok(result) = self.rx.try_recv() {
            results.push(result);
        }
        results
    }

    /// Number of results queued
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True if no result is queued
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Create a fresh results channel for one run
pub fn result_channel() -> (ResultSender, ResultReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, ResultReceiver { rx })
}
