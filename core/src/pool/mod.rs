//! Worker pool: runs a fixed number of workers over one task source
//!
//! The pool:
//! - Spawns exactly `concurrency` worker tasks
//! - Shares one task source and one request executor between them
//! - Hands every worker a clone of the run's results sender
//! - Joins every worker before returning
//!
//! # Example
//!
//! ```ignore
//! use loadbench_core::pool::WorkerPoolBuilder;
//!
//! let (pool, mut results) = WorkerPoolBuilder::new()
//!     .concurrency(10)
//!     .client(client)
//!     .build()?;
//!
//! let summary = pool.run(tasks).await?;
//! let collected = results.drain();
//! ```

mod aggregator;
mod builder;
mod executor;

pub use aggregator::{aggregate_worker_stats, PoolSummary};
pub use builder::WorkerPoolBuilder;
pub use executor::WorkerPool;

#[cfg(test)]
mod tests;
