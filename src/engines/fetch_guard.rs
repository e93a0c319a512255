// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::FetchSettings;
use crate::engines::allowlist::HostAllowList;
use crate::engines::traits::{FetchError, FetchOutcome, OutboundFetcher};

/// Wall-clock budget for one fetch, shared across all redirect hops
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Streaming body size cap
pub const MAX_BODY_BYTES: usize = 5_000_000;
/// Redirect hop budget; every hop is re-validated against the allow-list
pub const MAX_REDIRECT_HOPS: usize = 5;

/// SSRF-guarded HTTP fetcher
///
/// Automatic redirect-following is disabled on the client because it would
/// bypass hostname validation; redirects are instead followed manually with
/// the allow-list re-applied at every hop. The body size cap is enforced
/// while streaming so adversarial responses cannot exhaust memory.
pub struct GuardedFetcher {
    client: reqwest::Client,
    allowlist: HostAllowList,
    timeout: Duration,
    max_body_bytes: usize,
}

impl GuardedFetcher {
    pub fn new(allowlist: HostAllowList) -> Result<Self, reqwest::Error> {
        Self::with_limits(allowlist, FETCH_TIMEOUT, MAX_BODY_BYTES)
    }

    pub fn from_settings(
        allowlist: HostAllowList,
        settings: &FetchSettings,
    ) -> Result<Self, reqwest::Error> {
        Self::with_limits(
            allowlist,
            Duration::from_secs(settings.timeout_secs),
            settings.max_body_bytes,
        )
    }

    pub fn with_limits(
        allowlist: HostAllowList,
        timeout: Duration,
        max_body_bytes: usize,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent("Mozilla/5.0 (compatible; DealerScopeBot/1.0)")
            .build()?;
        Ok(Self {
            client,
            allowlist,
            timeout,
            max_body_bytes,
        })
    }

    async fn read_capped(
        &self,
        response: reqwest::Response,
        deadline: Instant,
    ) -> Result<(Vec<u8>, u16), FetchError> {
        let status_code = response.status().as_u16();
        let mut body: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();

        loop {
            let chunk = match timeout_at(deadline, stream.next()).await {
                Ok(Some(chunk)) => chunk.map_err(map_reqwest_error)?,
                Ok(None) => break,
                Err(_) => return Err(FetchError::Timeout),
            };
            if body.len() + chunk.len() > self.max_body_bytes {
                metrics::counter!("outbound_fetch_oversize_total").increment(1);
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok((body, status_code))
    }
}

#[async_trait]
impl OutboundFetcher for GuardedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let deadline = Instant::now() + self.timeout;
        let mut current = Url::parse(url)?;

        metrics::counter!("outbound_fetch_total").increment(1);

        for hop in 0..=MAX_REDIRECT_HOPS {
            let host = current
                .host_str()
                .ok_or_else(|| FetchError::HostNotAllowed(current.to_string()))?;

            if !self.allowlist.is_allowed(host) {
                metrics::counter!("outbound_fetch_blocked_total").increment(1);
                let host = host.to_string();
                return Err(if hop == 0 {
                    FetchError::HostNotAllowed(host)
                } else {
                    FetchError::RedirectNotAllowed(host)
                });
            }

            let response = match timeout_at(deadline, self.client.get(current.clone()).send()).await
            {
                Ok(result) => result.map_err(map_reqwest_error)?,
                Err(_) => return Err(FetchError::Timeout),
            };

            if response.status().is_redirection() {
                let location = response
                    .headers()
                    .get(header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(FetchError::MissingRedirectLocation)?;
                let next = current.join(location)?;
                debug!(from = %current, to = %next, hop, "following redirect");
                current = next;
                continue;
            }

            let (body, status_code) = self.read_capped(response, deadline).await?;
            let bytes_read = body.len();
            if bytes_read == self.max_body_bytes {
                warn!(url = %current, "response body reached the size cap exactly");
            }
            return Ok(FetchOutcome {
                body: String::from_utf8_lossy(&body).into_owned(),
                status_code,
                bytes_read,
            });
        }

        Err(FetchError::TooManyRedirects(MAX_REDIRECT_HOPS))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::RequestFailed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_fetcher() -> GuardedFetcher {
        GuardedFetcher::new(HostAllowList::default()).unwrap()
    }

    #[tokio::test]
    async fn test_unlisted_host_rejected_before_any_network_call() {
        // A host that would fail DNS; the guard must reject it without trying.
        let err = default_fetcher()
            .fetch("http://definitely-not-on-the-list.invalid/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::HostNotAllowed(_)));
    }

    #[tokio::test]
    async fn test_private_address_rejected_in_live_mode() {
        let err = default_fetcher()
            .fetch("http://127.0.0.1/internal")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Host not allowed"));

        let err = default_fetcher()
            .fetch("http://169.254.169.254/latest/meta-data/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::HostNotAllowed(_)));
    }

    #[tokio::test]
    async fn test_unparseable_url_rejected() {
        let err = default_fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
