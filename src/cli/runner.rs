//! CLI runner - resolves the job and executes it

use crate::cli::commands::{Cli, SummaryFormat};
use crate::collector::{PageCollector, RunSummary};
use crate::config::{builtin_job, load_job, ScrapeJob};
use crate::error::{Result, ResultExt};
use crate::fetch::HttpPageFetcher;
use crate::http::HttpClient;
use crate::output::{export_records, ExportFormat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Outcome of a job run after export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Job name
    pub job: String,
    /// File written
    pub output: PathBuf,
    /// Format written
    pub format: ExportFormat,
    /// Rows in the exported file
    pub rows_written: usize,
    /// When collection started
    pub started_at: DateTime<Utc>,
    /// When collection ended
    pub finished_at: DateTime<Utc>,
    /// Collection wall-clock time in milliseconds
    pub duration_ms: i64,
    /// Collection summary
    #[serde(flatten)]
    pub run: RunSummary,
}

/// Collect every page of `job` and export the records.
///
/// The export happens whatever the stop reason, so an interrupted or failed
/// run still leaves the records gathered so far on disk.
pub async fn run_job(job: &ScrapeJob, cancel: &CancellationToken) -> Result<JobReport> {
    let template = job.page_template()?;
    let format = job.export_format()?;
    let client = HttpClient::with_config(job.http_config()).context("building HTTP client")?;
    let fetcher = HttpPageFetcher::new(client, job.extractor()?);
    let collector = PageCollector::new(job.collector_config());

    info!(
        job = %job.name,
        template = %template,
        max_pages = job.max_pages,
        "Starting run"
    );

    let started_at = Utc::now();
    let result = collector
        .collect_with_cancel(&template, &fetcher, cancel)
        .await;
    let finished_at = Utc::now();

    if !result.stop_reason.is_clean() {
        warn!(
            job = %job.name,
            stop_reason = %result.stop_reason,
            records = result.record_count(),
            "Run ended early, exporting partial results"
        );
    }

    let rows_written = export_records(&job.output.path, &result.all_records, format)?;

    Ok(JobReport {
        job: job.name.clone(),
        output: job.output.path.clone(),
        format,
        rows_written,
        started_at,
        finished_at,
        duration_ms: (finished_at - started_at).num_milliseconds(),
        run: result.summary(),
    })
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the job described by the command line
    pub async fn run(&self) -> Result<()> {
        let job = self.resolve_job()?;

        if self.cli.check {
            self.output_message(&json!({
                "type": "VALIDATION",
                "status": "OK",
                "job": job.name,
                "template": job.url_template,
                "output": job.output.path,
            }));
            return Ok(());
        }

        let cancel = CancellationToken::new();
        let interrupt = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, stopping after the records collected so far");
                    cancel.cancel();
                }
            }
        });

        let report = run_job(&job, &cancel).await;
        interrupt.abort();
        let report = report?;

        self.output_message(&serde_json::to_value(&report)?);
        Ok(())
    }

    /// Load the job and apply command-line overrides
    fn resolve_job(&self) -> Result<ScrapeJob> {
        let mut job = match &self.cli.job {
            Some(path) => load_job(path)?,
            None => builtin_job()?,
        };

        if let Some(output) = &self.cli.output {
            job.output.path = output.clone();
            // A new path may imply a different format
            job.output.format = None;
        }
        if let Some(format) = self.cli.format {
            job.output.format = Some(format);
        }
        if let Some(max_pages) = self.cli.max_pages {
            job.max_pages = max_pages;
        }
        if let Some(delay_ms) = self.cli.delay_ms {
            job.page_delay_ms = delay_ms;
        }

        job.validate()?;
        Ok(job)
    }

    fn output_message(&self, msg: &Value) {
        match self.cli.summary {
            SummaryFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            SummaryFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
