//! HTTP fetcher implementation
//!
//! This module handles every outbound request of the pipeline:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests with a fixed retry budget and linearly growing backoff

use crate::config::{Config, FetchConfig};
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;

/// Retry budget and backoff unit for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// The wait before retry `n` is `n * backoff_base`
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Delay to wait before the given attempt (0 is the first try)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }

    /// Total attempts including the first try
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_base: config.backoff_base(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use reelpick::config::Config;
/// use reelpick::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.fetch.timeout_secs))
        .connect_timeout(Duration::from_secs(config.fetch.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying on any failure
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Return the body |
/// | Any other status | Retry; `Ok(None)` once the budget is spent |
/// | Network or body error | Retry; `Err` if it happens on the last attempt |
///
/// Attempt `n` waits `n * backoff_base` first, so with the defaults the
/// three attempts start at 0ms, 500ms and 1000ms after the previous one.
///
/// # Returns
///
/// * `Ok(Some(body))` - A successful response
/// * `Ok(None)` - Every attempt got a non-success status
/// * `Err(reqwest::Error)` - The final attempt failed at the network level
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    headers: HeaderMap,
    policy: RetryPolicy,
) -> Result<Option<String>, reqwest::Error> {
    let attempts = policy.attempts();

    for attempt in 0..attempts {
        if attempt > 0 {
            let delay = policy.delay_for(attempt);
            tracing::debug!("Retrying {} in {:?} (attempt {}/{})", url, delay, attempt + 1, attempts);
            tokio::time::sleep(delay).await;
        }

        let is_last = attempt + 1 == attempts;

        match send_once(client, url, headers.clone()).await {
            Ok(Some(body)) => return Ok(Some(body)),
            Ok(None) => {}
            Err(e) if is_last => return Err(e),
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
            }
        }
    }

    tracing::warn!("Giving up on {} after {} attempts", url, attempts);
    Ok(None)
}

/// One GET; `Ok(None)` on a non-success status
async fn send_once(
    client: &Client,
    url: &str,
    headers: HeaderMap,
) -> Result<Option<String>, reqwest::Error> {
    let response = client.get(url).headers(headers).send().await?;
    let status = response.status();

    if !status.is_success() {
        tracing::warn!("HTTP {} from {}", status.as_u16(), url);
        return Ok(None);
    }

    response.text().await.map(Some)
}
