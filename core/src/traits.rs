//! The HTTP capability the engine delegates to
//!
//! The trait lives in core so the worker pool can be driven by any client.
//! The production implementation lives in the `loadbench-http` crate.

use crate::error::ErrorKind;
use crate::result::DetailTime;
use async_trait::async_trait;
use std::time::Duration;

// ============================================================================
// HTTP Client Trait
// ============================================================================

/// Minimal HTTP client contract: GET a URL and report status and body size
///
/// A single instance is shared by every worker of a run, so implementations
/// must be safe for concurrent use and must not leak state between requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Client identifier used in logs (e.g. "reqwest")
    fn name(&self) -> &str;

    /// Issue a GET request and read the full response body
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// What the engine needs to know about a completed response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Length of the response body in bytes
    pub body_size: usize,

    /// Phase breakdown, if the client can measure one
    pub detail_time: Option<DetailTime>,
}

impl HttpResponse {
    /// Create a response without phase timing
    pub fn new(status: u16, body_size: usize) -> Self {
        Self {
            status,
            body_size,
            detail_time: None,
        }
    }
}

/// Transport-level failures reported by an [`HttpClient`]
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Could not connect to the target
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request exceeded the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Host name did not resolve
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// Malformed response or body read error
    #[error("protocol error: {0}")]
    Protocol(String),

    /// URL could not be used to build a request
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other client error
    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    /// Convert to ErrorKind for result classification
    pub fn to_error_kind(&self) -> ErrorKind {
        match self {
            FetchError::Connect(_) => ErrorKind::Connect,
            FetchError::Timeout(_) => ErrorKind::Timeout,
            FetchError::Dns(_) => ErrorKind::Dns,
            FetchError::Protocol(_) => ErrorKind::Protocol,
            FetchError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            FetchError::Other(_) => ErrorKind::Unknown,
        }
    }
}
