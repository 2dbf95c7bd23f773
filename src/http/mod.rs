//! HTTP client module
//!
//! Provides the HTTP client used to download listing pages.
//!
//! # Features
//!
//! - **Automatic Retries**: Bounded retry of transient failures with backoff
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
