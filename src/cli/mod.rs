//! CLI module
//!
//! Command-line interface for running scrape jobs. With no arguments the
//! built-in job runs as-is; every flag is an override.

mod commands;
mod runner;

pub use commands::{Cli, SummaryFormat};
pub use runner::{run_job, JobReport, Runner};
