//! ab-style text summary

use crate::error::ReportError;
use crate::report::Report;
use loadbench_core::PhaseStats;
use serde::{Deserialize, Serialize};
use std::io::Write;

const NO_DATA: &str = "no data";

/// Multiplier applied to seconds in the percentile table
///
/// The historical report scales by 1024, so its "ms" column reads about
/// 2.4% high. [`DistributionScale::Milliseconds`] gives true milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionScale {
    /// Seconds × 1024
    #[default]
    Legacy,
    /// Seconds × 1000
    Milliseconds,
}

impl DistributionScale {
    /// Factor converting seconds to table units
    pub fn factor(self) -> f64 {
        match self {
            DistributionScale::Legacy => 1024.0,
            DistributionScale::Milliseconds => 1000.0,
        }
    }
}

/// Renders a [`Report`] in the ab layout
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReporter {
    scale: DistributionScale,
}

impl TextReporter {
    /// Create a reporter with the given percentile scale
    pub fn new(scale: DistributionScale) -> Self {
        Self { scale }
    }

    /// Line printed before the run starts
    pub fn write_banner<W: Write>(out: &mut W) -> Result<(), ReportError> {
        writeln!(out, "Benchmarking ....")?;
        out.flush()?;
        Ok(())
    }

    /// Render the report to a string
    pub fn render(&self, report: &Report) -> Result<String, ReportError> {
        let mut out = Vec::new();
        self.write(report, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Write the full summary
    pub fn write<W: Write>(&self, report: &Report, out: &mut W) -> Result<(), ReportError> {
        self.write_summary(report, out)?;
        if let Some(times) = &report.connection_times {
            writeln!(out, "Connection Times (ms)")?;
            writeln!(out, "              min  mean[+/-sd] median   max")?;
            for (name, phase) in times.phases() {
                write_phase_row(out, name, phase)?;
            }
            writeln!(out)?;
        }
        self.write_distribution(report, out)
    }

    fn write_summary<W: Write>(&self, report: &Report, out: &mut W) -> Result<(), ReportError> {
        writeln!(
            out,
            "Average Document Length: {}",
            or_no_data(report.avg_req_length, |v| format!("{:.0} bytes", v))
        )?;
        writeln!(out)?;
        writeln!(out, "Concurrency Level:    {}", report.concurrency)?;
        writeln!(
            out,
            "Time taken for tests: {}",
            or_no_data(report.total_wall_time, |v| format!("{:.3} seconds", v))
        )?;
        writeln!(out, "Complete requests:    {}", report.complete_requests)?;
        writeln!(out, "Failed requests:      {}", report.failed_requests)?;
        writeln!(out, "Total transferred:    {} bytes", report.total_req_length)?;
        writeln!(
            out,
            "Requests per second:  {}",
            or_no_data(report.requests_per_second, |v| format!(
                "{:.2} [#/sec] (mean)",
                v
            ))
        )?;
        writeln!(
            out,
            "Time per request:     {}",
            or_no_data(report.avg_req_time, |v| format!("{:.3} [ms] (mean)", v * 1000.0))
        )?;
        writeln!(
            out,
            "Time per request:     {}",
            or_no_data(report.time_per_request_across, |v| format!(
                "{:.3} [ms] (mean, across all concurrent requests)",
                v * 1000.0
            ))
        )?;
        writeln!(
            out,
            "Transfer rate:        {}",
            or_no_data(report.transfer_rate_kbytes, |v| format!(
                "{:.2} [Kbytes/sec] received",
                v
            ))
        )?;
        writeln!(out)?;
        Ok(())
    }

    fn write_distribution<W: Write>(
        &self,
        report: &Report,
        out: &mut W,
    ) -> Result<(), ReportError> {
        writeln!(
            out,
            "Percentage of the requests served within a certain time (ms)"
        )?;
        if report.distribution.is_empty() {
            writeln!(out, " {}", NO_DATA)?;
            return Ok(());
        }

        let factor = self.scale.factor();
        for entry in &report.distribution {
            write!(out, " {:>3}% {:>6.0}", entry.percentile, entry.seconds * factor)?;
            if entry.percentile == 100 {
                writeln!(out, " (longest request)")?;
            } else {
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

fn write_phase_row<W: Write>(
    out: &mut W,
    name: &str,
    phase: &PhaseStats,
) -> Result<(), ReportError> {
    let ms = |seconds: f64| (seconds * 1000.0).round() as i64;
    writeln!(
        out,
        "{:<11} {:>5} {:>5} {:>5.1} {:>6} {:>7}",
        format!("{}:", name),
        ms(phase.min),
        ms(phase.mean),
        phase.std_dev * 1000.0,
        ms(phase.median),
        ms(phase.max)
    )?;
    Ok(())
}

fn or_no_data(value: Option<f64>, render: impl FnOnce(f64) -> String) -> String {
    value.map(render).unwrap_or_else(|| NO_DATA.to_string())
}
