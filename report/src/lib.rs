//! Report generation for benchmark results
//!
//! A [`Report`] is an immutable snapshot of a finished run. It renders as
//! an ab-style text summary ([`TextReporter`]) or as pretty JSON
//! ([`JsonReporter`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod json;
mod report;
mod text;

pub use error::ReportError;
pub use json::JsonReporter;
pub use report::{PercentileEntry, Report};
pub use text::{DistributionScale, TextReporter};
