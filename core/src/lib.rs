//! loadbench-core: request dispatch and statistics engine
//!
//! This crate contains everything a load-test run needs apart from the
//! concrete HTTP client and the output formatting:
//!
//! - Run configuration and the task source (which URLs, how many times)
//! - The `HttpClient` trait the engine delegates HTTP to
//! - Request execution, workers and the worker pool
//! - The results channel and aggregate statistics
//! - Error handling
//!
//! # Example
//!
//! ```ignore
//! use loadbench_core::{BenchConfig, Benchmark};
//!
//! let config = BenchConfig::new("http://localhost:8080/")
//!     .with_requests(1000)
//!     .with_concurrency(50);
//!
//! let outcome = Benchmark::new(config, client)?.run().await?;
//! println!("failed: {}", outcome.stats.failed_requests());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bench;
pub mod channel;
pub mod config;
pub mod error;
pub mod executor;
pub mod pool;
pub mod result;
pub mod stats;
pub mod task;
pub mod traits;
pub mod worker;

pub use bench::{BenchOutcome, Benchmark, RunPhase};
pub use channel::{result_channel, ResultReceiver, ResultSender};
pub use config::{BenchConfig, ConfigError};
pub use error::{BenchError, BenchResult, ErrorKind};
pub use executor::RequestExecutor;
pub use pool::{PoolSummary, WorkerPool, WorkerPoolBuilder};
pub use result::{DetailTime, RequestResult, FAILED_STATUS};
pub use stats::{ConnectionTimes, PhaseStats, ResultStats, DISTRIBUTION_PERCENTILES};
pub use task::{Task, TaskSource, UrlSet};
pub use traits::{FetchError, HttpClient, HttpResponse};
pub use worker::{Worker, WorkerBuilder, WorkerStats};
