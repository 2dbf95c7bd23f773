//! Collector types
//!
//! Configuration and result types for the page collection loop.

use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why the collection loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopReason {
    /// A page succeeded with no records: the result set is exhausted
    EmptyPage,
    /// A page fetch failed; the run stopped there
    FetchError,
    /// The page ceiling was reached
    MaxPages,
    /// The run was cancelled by the caller
    Cancelled,
}

impl StopReason {
    /// Upper-case name as used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::EmptyPage => "EMPTY_PAGE",
            StopReason::FetchError => "FETCH_ERROR",
            StopReason::MaxPages => "MAX_PAGES",
            StopReason::Cancelled => "CANCELLED",
        }
    }

    /// True for the stop reasons that do not indicate a problem
    pub fn is_clean(&self) -> bool {
        matches!(self, StopReason::EmptyPage | StopReason::MaxPages)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Highest page index fetched (pages are 1-based)
    pub max_pages: u32,
    /// Pause between successful fetches
    pub page_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_pages: 99,
            page_delay: Duration::from_secs(2),
        }
    }
}

impl CollectorConfig {
    /// Create a new collector config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the delay between pages
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }
}

/// Outcome of a collection run.
///
/// `all_records` holds every record in page order, then discovery order
/// within a page. It is kept even when the run stops on an error or is
/// cancelled. No wall-clock data is stored, so two runs over the same pages
/// compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Accumulated records
    pub all_records: Vec<Record>,
    /// Pages that contributed records
    pub pages_fetched: u32,
    /// Terminal condition
    pub stop_reason: StopReason,
    /// Error reported by the failing page, if any
    pub last_error: Option<String>,
}

impl RunResult {
    /// Number of accumulated records
    pub fn record_count(&self) -> usize {
        self.all_records.len()
    }

    /// Compact summary without the records themselves
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            records: self.record_count(),
            pages_fetched: self.pages_fetched,
            stop_reason: self.stop_reason,
            last_error: self.last_error.clone(),
        }
    }
}

/// Serializable run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub records: usize,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
