//! Report errors

use thiserror::Error;

/// Failure to render or write a report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Writing to the output sink failed
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
