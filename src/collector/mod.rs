//! Page collection loop
//!
//! Walks page indices `1..=max_pages` through a URL template, one fetch at a
//! time, and accumulates records until a page is empty, a fetch fails, the
//! ceiling is reached or the run is cancelled.
//!
//! # Overview
//!
//! - `PageCollector` - the loop and its stop policy
//! - `CollectorConfig` - page ceiling and inter-page delay
//! - `RunResult` / `StopReason` - what was collected and why the loop ended

mod types;

pub use types::{CollectorConfig, RunResult, RunSummary, StopReason};

use crate::fetch::PageFetcher;
use crate::template::PageUrlTemplate;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Sequential page collector
#[derive(Debug, Clone, Default)]
pub struct PageCollector {
    config: CollectorConfig,
}

impl PageCollector {
    /// Create a collector
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Run the loop to completion
    pub async fn collect(
        &self,
        template: &PageUrlTemplate,
        fetcher: &dyn PageFetcher,
    ) -> RunResult {
        self.collect_with_cancel(template, fetcher, &CancellationToken::new())
            .await
    }

    /// Run the loop, stopping early when `cancel` fires.
    ///
    /// Cancellation is observed while a fetch is in flight and during the
    /// inter-page delay. Records gathered before cancellation are returned.
    pub async fn collect_with_cancel(
        &self,
        template: &PageUrlTemplate,
        fetcher: &dyn PageFetcher,
        cancel: &CancellationToken,
    ) -> RunResult {
        let max_pages = self.config.max_pages;

        let mut all_records = Vec::new();
        let mut pages_fetched = 0u32;
        let mut last_error = None;
        let mut stop_reason = StopReason::MaxPages;

        for page in 1..=max_pages {
            let url = template.render(page);
            info!(page, %url, "Fetching page");

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    stop_reason = StopReason::Cancelled;
                    break;
                }
                result = fetcher.fetch(&url) => result,
            };

            if !result.success {
                let message = result
                    .error
                    .unwrap_or_else(|| "fetch failed without an error message".to_string());
                warn!(page, %url, error = %message, "Fetch failed, stopping");
                last_error = Some(message);
                stop_reason = StopReason::FetchError;
                break;
            }

            if result.records.is_empty() {
                info!(page, "No records on page, result set exhausted");
                stop_reason = StopReason::EmptyPage;
                break;
            }

            debug!(page, records = result.records.len(), "Page collected");
            all_records.extend(result.records);
            pages_fetched += 1;

            if page < max_pages && !self.pause(cancel).await {
                stop_reason = StopReason::Cancelled;
                break;
            }
        }

        if stop_reason == StopReason::MaxPages && max_pages > 0 {
            warn!(max_pages, "Page ceiling reached; later pages were not fetched");
        }

        info!(
            records = all_records.len(),
            pages_fetched,
            stop_reason = %stop_reason,
            "Collection finished"
        );

        RunResult {
            all_records,
            pages_fetched,
            stop_reason,
            last_error,
        }
    }

    /// Sleep the page delay; false if cancelled first
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        if self.config.page_delay.is_zero() {
            return !cancel.is_cancelled();
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => false,
            () = tokio::time::sleep(self.config.page_delay) => true,
        }
    }
}

/// Collect pages with an ad-hoc configuration
pub async fn collect(
    template: &PageUrlTemplate,
    max_pages: u32,
    page_delay: Duration,
    fetcher: &dyn PageFetcher,
) -> RunResult {
    PageCollector::new(CollectorConfig {
        max_pages,
        page_delay,
    })
    .collect(template, fetcher)
    .await
}
