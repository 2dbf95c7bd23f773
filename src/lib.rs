// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # listing-harvest
//!
//! Walks a paginated product listing page by page, extracts one flat record
//! per item with CSS selectors and exports everything to a tabular file.
//!
//! ## Features
//!
//! - **Page loop with a stop policy**: ends on an empty page, the first
//!   failed fetch, a page ceiling or cancellation
//! - **YAML jobs**: URL template, limits, CSS schema, HTTP and output settings
//! - **Polite HTTP**: fixed inter-page delay, opt-in retries, optional rate limit
//! - **Export**: XLSX, CSV or Parquet with a fixed column order
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listing_harvest::{builtin_job, run_job, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let job = builtin_job()?;
//!     let report = run_job(&job, &CancellationToken::new()).await?;
//!     println!("{} records, stopped on {}", report.rows_written, report.run.stop_reason);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       PageCollector                          │
//! │  for page in 1..=max_pages: fetch → stop policy → delay      │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────┬────────────────┴──────┬──────────────┬──────────┐
//! │  Template  │   PageFetcher         │   Extract    │  Output  │
//! ├────────────┼───────────────────────┼──────────────┼──────────┤
//! │ {page}     │ HTTP GET              │ CSS schema   │ Arrow    │
//! │            │ Retry / Backoff       │ scraper      │ XLSX     │
//! │            │ Rate Limit            │              │ CSV      │
//! │            │                       │              │ Parquet  │
//! └────────────┴───────────────────────┴──────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Record model and shared types
pub mod types;

/// Page URL templates
pub mod template;

/// CSS-selector record extraction
pub mod extract;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page fetcher trait and HTTP implementation
pub mod fetch;

/// Page collection loop
pub mod collector;

/// XLSX/CSV/Parquet export
pub mod output;

/// Scrape job configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use cli::{run_job, JobReport};
pub use collector::{collect, CollectorConfig, PageCollector, RunResult, StopReason};
pub use config::{builtin_job, load_job, load_job_from_str, ScrapeJob};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use output::{export_records, ExportFormat};
pub use template::PageUrlTemplate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
