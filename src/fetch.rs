//! Page fetching
//!
//! The [`PageFetcher`] trait is the seam between the collector loop and
//! whatever downloads and parses a page. Fetchers report failure inside the
//! returned [`PageResult`] and never return an error.

use crate::error::Result;
use crate::extract::CssExtractor;
use crate::http::HttpClient;
use crate::types::PageResult;
use async_trait::async_trait;
use tracing::debug;

/// Fetches one listing page and extracts its records
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`. Must not panic; failures go in `PageResult::error`.
    async fn fetch(&self, url: &str) -> PageResult;
}

/// Fetcher that downloads pages over HTTP and applies a CSS schema
#[derive(Debug)]
pub struct HttpPageFetcher {
    client: HttpClient,
    extractor: CssExtractor,
}

impl HttpPageFetcher {
    /// Create a fetcher from a client and a compiled schema
    pub fn new(client: HttpClient, extractor: CssExtractor) -> Self {
        Self { client, extractor }
    }

    async fn try_fetch(&self, url: &str) -> Result<PageResult> {
        let body = self.client.get_text(url).await?;
        let records = self.extractor.extract(&body);
        debug!(
            url,
            bytes = body.len(),
            records = records.len(),
            schema = self.extractor.name(),
            "Extracted page"
        );
        Ok(PageResult::ok(records))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> PageResult {
        match self.try_fetch(url).await {
            Ok(result) => result,
            Err(e) => {
                debug!(url, error = %e, retryable = e.is_retryable(), "Page fetch failed");
                PageResult::failure(e.to_string())
            }
        }
    }
}
