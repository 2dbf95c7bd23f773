//! CLI arguments

use crate::output::ExportFormat;
use clap::Parser;
use std::path::PathBuf;

/// Paginated listing scraper
#[derive(Parser, Debug)]
#[command(name = "listing-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job definition file (YAML); the built-in job is used when omitted
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Export path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format (inferred from the output extension by default)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Highest page index to fetch
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Pause between pages in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Validate the job and exit without fetching
    #[arg(long)]
    pub check: bool,

    /// Run summary format
    #[arg(long, default_value = "json")]
    pub summary: SummaryFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the run summary is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    /// One JSON object per line
    Json,
    /// Indented JSON
    Pretty,
}
