//! reqwest-backed HTTP client for loadbench
//!
//! Implements the core [`HttpClient`](loadbench_core::HttpClient) trait on top
//! of a single pooled `reqwest::Client`, shared by every worker of a run.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;

pub use client::{ClientError, ReqwestClient};
pub use config::HttpClientConfig;
