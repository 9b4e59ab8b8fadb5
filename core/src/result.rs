//! Per-request outcome records

pub use crate::error::ErrorKind;

use serde::Serialize;
use std::time::Duration;

/// Status code recorded for a request that never produced an HTTP response
pub const FAILED_STATUS: i32 = -1;

/// Optional per-phase timing split, all values in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetailTime {
    /// Time spent establishing the connection
    pub connect: f64,
    /// Time the server spent processing before the first byte
    pub process: f64,
    /// Time spent waiting for the rest of the response
    pub wait: f64,
}

impl DetailTime {
    /// Create a new phase breakdown
    pub fn new(connect: f64, process: f64, wait: f64) -> Self {
        Self {
            connect,
            process,
            wait,
        }
    }
}

/// Outcome of one scheduled request
///
/// Fields are private so that the invariants hold for every value:
/// elapsed time is never negative, and a failed request carries no body.
/// For the same reason results serialize but never deserialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestResult {
    elapsed_seconds: f64,
    body_size: usize,
    status_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail_time: Option<DetailTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
}

impl RequestResult {
    /// Record a request that received an HTTP response
    pub fn success(elapsed: Duration, body_size: usize, status_code: u16) -> Self {
        Self {
            elapsed_seconds: elapsed.as_secs_f64(),
            body_size,
            status_code: i32::from(status_code),
            detail_time: None,
            error: None,
        }
    }

    /// Record a transport-level failure
    ///
    /// Failed requests report zero elapsed time and zero bytes.
    pub fn failure(kind: ErrorKind) -> Self {
        Self {
            elapsed_seconds: 0.0,
            body_size: 0,
            status_code: FAILED_STATUS,
            detail_time: None,
            error: Some(kind),
        }
    }

    /// Attach a connection-phase breakdown
    pub fn with_detail_time(mut self, detail: DetailTime) -> Self {
        self.detail_time = Some(detail);
        self
    }

    /// Wall-clock duration of the request in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Response body length in bytes
    pub fn body_size(&self) -> usize {
        self.body_size
    }

    /// HTTP status code, or [`FAILED_STATUS`]
    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    /// Connection-phase breakdown, when the client measured one
    pub fn detail_time(&self) -> Option<&DetailTime> {
        self.detail_time.as_ref()
    }

    /// Failure cause for transport-level failures
    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// True if the request never produced an HTTP response
    pub fn is_transport_failure(&self) -> bool {
        self.status_code == FAILED_STATUS
    }

    /// True for a plain `200 OK`; every other status counts as failed
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

impl std::fmt::Display for RequestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RequestResult({:.5}, {}, {}, detail_time={:?})",
            self.elapsed_seconds, self.body_size, self.status_code, self.detail_time
        )
    }
}
