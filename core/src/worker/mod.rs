//! Worker module for executing scheduled requests
//!
//! A Worker is the unit of concurrency in loadbench. Its loop is deliberately
//! small: **claim -> yield -> fetch -> report -> repeat**.
//!
//! Each Worker is a tokio task that:
//!
//! 1. Claims the next task from the shared [`TaskSource`](crate::TaskSource)
//! 2. Yields to the scheduler so other workers get a fair chance at claiming
//! 3. Fetches the URL through the shared [`RequestExecutor`](crate::RequestExecutor)
//! 4. Pushes the [`RequestResult`](crate::RequestResult) onto the results channel
//! 5. Stops as soon as the task source is empty
//!
//! # Example
//!
//! ```ignore
//! use loadbench_core::worker::WorkerBuilder;
//!
//! let worker = WorkerBuilder::new(0)
//!     .executor(executor)
//!     .tasks(tasks)
//!     .results_tx(tx)
//!     .build()?;
//!
//! let stats = worker.run().await?;
//! println!("Fetched: {}", stats.total_requests());
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use stats::WorkerStats;
