//! JSON export

use crate::error::ReportError;
use crate::report::Report;
use std::io::Write;

/// Writes a [`Report`] as pretty-printed JSON
pub struct JsonReporter;

impl JsonReporter {
    /// Render the report to a string
    pub fn to_string(report: &Report) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write the report followed by a newline
    pub fn write<W: Write>(report: &Report, out: &mut W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}
