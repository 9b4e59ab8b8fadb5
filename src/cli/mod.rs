//! CLI argument parsing and command handling

use anyhow::{Context, Result};
use clap::Parser;
use loadbench_core::{BenchConfig, Benchmark, UrlSet};
use loadbench_http::{HttpClientConfig, ReqwestClient};
use loadbench_report::{DistributionScale, JsonReporter, Report, TextReporter};
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;


/// loadbench - fetch URLs concurrently and report latency statistics
#[derive(Parser, Debug)]
#[command(name = "loadbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target URLs; several are fetched round-robin
    pub urls: Vec<String>,

    /// File with one URL per line (blank lines and `#` comments skipped);
    /// replaces any URLs given as arguments
    #[arg(short = 'f', long)]
    pub url_file: Option<PathBuf>,

    /// Total number of requests to perform
    #[arg(short = 'n', long, default_value = "1")]
    pub requests: usize,

    /// Number of requests in flight at once
    #[arg(short, long, default_value = "1")]
    pub concurrency: usize,

    /// Append the report to this file instead of stdout
    #[arg(short, long)]
    pub out_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "30", env = "LOADBENCH_TIMEOUT")]
    pub timeout: u64,

    /// Connect timeout in seconds (defaults to the request timeout)
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Scale the percentile table by 1000 instead of 1024
    #[arg(long)]
    pub distribution_ms: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run the benchmark described by the arguments and write its report
    pub async fn run(&self) -> Result<()> {
        let urls = self.url_set()?;
        let client =
            ReqwestClient::new(self.http_config()?).context("Failed to create HTTP client")?;

        let config = BenchConfig::new(urls)
            .with_requests(self.requests)
            .with_concurrency(self.concurrency);
        let bench = Benchmark::new(config, Arc::new(client))
            .context("Invalid benchmark configuration")?;

        tracing::info!(
            requests = self.requests,
            concurrency = self.concurrency,
            timeout_secs = self.timeout,
            "Starting benchmark"
        );

        let mut out = self.open_output()?;

        let outcome = until_interrupted(bench.run(), tokio::signal::ctrl_c())
            .await?
            .context("Benchmark failed")?;

        let report = Report::new(&outcome.stats, self.concurrency).with_workers(outcome.workers);
        self.write_report(&report, &mut out)?;
        out.flush().context("Failed to flush report")?;

        Ok(())
    }

    /// Collect target URLs: the URL file if given, else the positional arguments
    pub fn url_set(&self) -> Result<UrlSet> {
        let mut urls = match self.url_file {
            Some(ref path) => {
                if !self.urls.is_empty() {
                    tracing::warn!(
                        ignored = self.urls.len(),
                        file = %path.display(),
                        "URL file given; ignoring URL arguments"
                    );
                }
                load_url_file(path)
                    .with_context(|| format!("Failed to load URLs from: {}", path.display()))?
            }
            None => self.urls.clone(),
        };

        match urls.len() {
            0 => anyhow::bail!("No URLs given; pass at least one URL or --url-file"),
            1 => Ok(UrlSet::Single(urls.remove(0))),
            _ => Ok(UrlSet::List(urls)),
        }
    }

    /// HTTP client settings from the timeout and header flags
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        if self.timeout == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }

        let mut config = HttpClientConfig::default().with_timeout(Duration::from_secs(self.timeout));
        if let Some(secs) = self.connect_timeout {
            if secs == 0 {
                anyhow::bail!("Connect timeout must be at least one second");
            }
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        if let Some(ref agent) = self.user_agent {
            config = config.with_user_agent(agent.clone());
        }
        Ok(config)
    }

    /// Write the banner and summary, or the JSON document
    ///
    /// Only called once a run has finished, so an aborted run leaves
    /// nothing in an append-mode output file.
    fn write_report<W: Write>(&self, report: &Report, out: &mut W) -> Result<()> {
        if self.json {
            JsonReporter::write(report, out)?;
        } else {
            TextReporter::write_banner(out)?;
            TextReporter::new(self.distribution_scale()).write(report, out)?;
        }
        Ok(())
    }

    fn distribution_scale(&self) -> DistributionScale {
        if self.distribution_ms {
            DistributionScale::Milliseconds
        } else {
            DistributionScale::Legacy
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send>> {
        match self.out_file {
            Some(ref path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file: {}", path.display()))?;
                Ok(Box::new(io::BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }
}

/// Drive `run` to completion unless `interrupt` fires first
///
/// An interrupt source that errors (the signal handler could not be
/// installed) is disabled instead of counting as an interrupt.
async fn until_interrupted<T>(
    run: impl Future<Output = T>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> Result<T> {
    tokio::select! {
        output = run => Ok(output),
        Ok(()) = interrupt => anyhow::bail!("Interrupted; no report written"),
    }
}

/// Read one URL per line, skipping blanks and `#` comments
pub fn load_url_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    if urls.is_empty() {
        anyhow::bail!("URL file contains no URLs");
    }
    Ok(urls)
}
