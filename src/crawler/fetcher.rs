//! Rate-limited HTTP fetcher
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building one reusable HTTP client from an explicit [`FetchPolicy`]
//! - Spacing the starts of consecutive requests by a fixed delay
//! - Classifying responses instead of raising on non-success statuses
//! - Optional bounded retry with backoff for transient failures

use crate::config::FetcherConfig;
use crate::HoopstatError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Request identification, timeouts and pacing, fixed for a crawl
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Minimum spacing between the starts of two requests
    pub request_delay: Duration,
    /// Extra attempts for retryable failures; 0 means one attempt per URL
    pub max_retries: u32,
    /// Backoff before the first retry, doubled for each further retry
    pub retry_backoff: Duration,
}

impl FetchPolicy {
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            request_delay: config.request_delay(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::from_config(&FetcherConfig::default())
    }
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
        /// Whether another attempt might succeed
        retryable: bool,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Server errors and timeouts are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Success { .. } => false,
            Self::HttpError { status_code } => {
                StatusCode::from_u16(*status_code).is_ok_and(|s| s.is_server_error())
            }
            Self::NetworkError { retryable, .. } => *retryable,
        }
    }
}

/// Anything that can turn a URL into a [`FetchResult`]
///
/// Crawlers are generic over this so they can run against the live catalog
/// or a canned set of pages.
pub trait PageSource: Send {
    fn fetch(&mut self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// Enforces a minimum spacing between the starts of consecutive requests
///
/// Time spent inside a request counts toward the spacing, so a slow response
/// shortens the next wait rather than adding to it.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last_start: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_start: None,
        }
    }

    /// Waits until the next request may start and records that start
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_start {
            let ready_at = last + self.delay;
            if ready_at > Instant::now() {
                tracing::trace!("Pacing for {:?}", ready_at - Instant::now());
                tokio::time::sleep_until(ready_at).await;
            }
        }
        self.last_start = Some(Instant::now());
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `policy` - The fetch policy carrying user agent and timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(policy: &FetchPolicy) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(policy.user_agent.clone())
        .timeout(policy.timeout)
        .connect_timeout(policy.connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a single GET and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success |
/// | Any other status | HttpError (retryable if 5xx) |
/// | Timeout | NetworkError, retryable |
/// | Connection refused | NetworkError |
/// | Body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    retryable: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    retryable: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                    retryable: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    retryable: false,
                }
            }
        }
    }
}

/// One-request-at-a-time fetcher over a single persistent client
pub struct RateLimitedFetcher {
    client: Client,
    pacer: Pacer,
    policy: FetchPolicy,
    requests_made: u64,
}

impl RateLimitedFetcher {
    /// Builds the client from `policy`
    pub fn new(policy: FetchPolicy) -> Result<Self, HoopstatError> {
        let client = build_http_client(&policy)?;
        Ok(Self::with_client(client, policy))
    }

    /// Uses an already configured client
    pub fn with_client(client: Client, policy: FetchPolicy) -> Self {
        Self {
            client,
            pacer: Pacer::new(policy.request_delay),
            policy,
            requests_made: 0,
        }
    }

    /// Number of HTTP requests issued so far, retries included
    pub fn requests_made(&self) -> u64 {
        self.requests_made
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }
}

impl PageSource for RateLimitedFetcher {
    async fn fetch(&mut self, url: &str) -> FetchResult {
        let mut attempt = 0;

        loop {
            self.pacer.wait().await;
            self.requests_made += 1;
            let result = fetch_url(&self.client, url).await;

            if !result.is_retryable() || attempt >= self.policy.max_retries {
                return result;
            }

            let backoff = self.policy.retry_backoff * 2u32.saturating_pow(attempt);
            attempt += 1;
            tracing::debug!(
                "Retrying {} in {:?} (attempt {} of {}): {:?}",
                url,
                backoff,
                attempt,
                self.policy.max_retries,
                result
            );
            tokio::time::sleep(backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetchPolicy::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_policy_from_config() {
        let config = FetcherConfig {
            user_agent: "TestHarvester/1.0".to_string(),
            request_delay_ms: 1500,
            timeout_secs: 7,
            connect_timeout_secs: 3,
            max_retries: 2,
            retry_backoff_ms: 250,
        };
        let policy = FetchPolicy::from_config(&config);

        assert_eq!(policy.user_agent, "TestHarvester/1.0");
        assert_eq!(policy.request_delay, Duration::from_millis(1500));
        assert_eq!(policy.timeout, Duration::from_secs(7));
        assert_eq!(policy.retry_backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_default_policy_waits_ten_seconds() {
        assert_eq!(FetchPolicy::default().request_delay, Duration::from_secs(10));
        assert_eq!(FetchPolicy::default().max_retries, 0);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(FetchResult::HttpError { status_code: 503 }.is_retryable());
        assert!(!FetchResult::HttpError { status_code: 404 }.is_retryable());
        assert!(!FetchResult::HttpError { status_code: 429 }.is_retryable());
        assert!(FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            retryable: true
        }
        .is_retryable());
        assert!(!FetchResult::Success {
            status_code: 200,
            body: String::new()
        }
        .is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_first_call_is_immediate() {
        let mut pacer = Pacer::new(Duration::from_secs(10));
        let start = Instant::now();
        pacer.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_spaces_starts() {
        let mut pacer = Pacer::new(Duration::from_secs(10));
        let start = Instant::now();

        pacer.wait().await;
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(10));

        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_counts_request_latency() {
        let mut pacer = Pacer::new(Duration::from_secs(10));
        let start = Instant::now();

        pacer.wait().await;
        // a request that took 4s leaves 6s to wait
        tokio::time::advance(Duration::from_secs(4)).await;
        pacer.wait().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(11));

        // a request slower than the delay leaves nothing to wait
        tokio::time::advance(Duration::from_secs(15)).await;
        let before = Instant::now();
        pacer.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
