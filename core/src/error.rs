//! Error types for loadbench-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error type
///
/// Only configuration and orchestration problems surface here. Per-request
/// transport failures never become a `BenchError`; they are folded into the
/// run's results as failed [`RequestResult`](crate::RequestResult)s.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A required builder field was not supplied
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// Worker pool error
    #[error("worker pool error: {0}")]
    Pool(String),
}

impl BenchError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        BenchError::Config(message.into())
    }

    /// Create a missing-field error for a builder
    pub fn missing_config(field: &'static str) -> Self {
        BenchError::MissingConfig(field)
    }

    /// Create a worker pool error
    pub fn pool(message: impl Into<String>) -> Self {
        BenchError::Pool(message.into())
    }
}

impl From<crate::config::ConfigError> for BenchError {
    fn from(err: crate::config::ConfigError) -> Self {
        BenchError::Config(err.to_string())
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// Classification of a failed request, kept on the failed result for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Connection refused, reset, or host unreachable
    Connect,
    /// Request did not complete within the client timeout
    Timeout,
    /// Name resolution failed
    Dns,
    /// Malformed response, body read failure, or other protocol error
    Protocol,
    /// URL could not be turned into a request
    InvalidUrl,
    /// Anything the client could not classify
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Connect => "connect",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Dns => "dns",
            ErrorKind::Protocol => "protocol",
            ErrorKind::InvalidUrl => "invalid_url",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
