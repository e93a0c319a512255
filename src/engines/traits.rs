// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// Fetch guard error type
#[derive(Error, Debug)]
pub enum FetchError {
    /// The hostname failed allow-list validation before any network call
    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),
    /// A redirect hop resolved to a disallowed host
    #[error("Redirect not allowed: {0}")]
    RedirectNotAllowed(String),
    /// A 3xx response carried no usable Location header
    #[error("Redirect response missing Location header")]
    MissingRedirectLocation,
    /// The redirect hop budget was exhausted
    #[error("Too many redirects (limit {0})")]
    TooManyRedirects(usize),
    /// The streamed body exceeded the size cap
    #[error("Response body exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },
    /// The shared fetch deadline fired
    #[error("Timeout")]
    Timeout,
    /// The target descriptor is not a parseable URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Transport-level failure
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Result of one guarded fetch
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Response body, decoded lossily as UTF-8
    pub body: String,
    /// Final HTTP status code
    pub status_code: u16,
    /// Bytes read from the body stream
    pub bytes_read: usize,
}

/// Constrained outbound fetcher
///
/// The only component allowed to reach the network on behalf of a job.
/// Trait seam so the scraper can be exercised with counting/failing mocks.
#[async_trait]
pub trait OutboundFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError>;
}
