//! AbuseIPDB check-block client implementation.

use std::sync::Arc;
use std::time::Duration;

use abusewatch_core::{AbuseError, CheckBlockResponse, ReportRow, Result};
use chrono::Utc;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::keys::{KeySelector, RandomSelector};

/// The AbuseIPDB API base URL
const DEFAULT_BASE_URL: &str = "https://api.abuseipdb.com";

/// Path of the check-block endpoint
const CHECK_BLOCK_PATH: &str = "/api/v2/check-block";

/// Maximum report age requested from the API. This is a cost hint; the
/// authoritative filter is the client-side recency check on each row.
const MAX_AGE_IN_DAYS: &str = "7";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the AbuseIPDB check-block endpoint
#[derive(Clone)]
pub struct AbuseClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    keys: Vec<String>,
    base_url: String,
    retry: RetryConfig,
    selector: Box<dyn KeySelector>,
}

impl AbuseClient {
    /// Create a new client over the given key set using default settings
    #[must_use]
    pub fn new(keys: Vec<String>) -> Self {
        AbuseClientBuilder::new(keys).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(keys: Vec<String>) -> AbuseClientBuilder {
        AbuseClientBuilder::new(keys)
    }

    /// Query one network prefix for addresses reported within the last week.
    ///
    /// Each attempt draws a fresh key from the key set. Transport errors and
    /// 401 responses are retried with linear backoff until the configured
    /// attempt budget is spent; any other non-2xx status and undecodable
    /// bodies fail immediately. Rows without a parseable, recent
    /// `mostRecentReport` are dropped, not surfaced as errors.
    pub async fn check_block(&self, network: &str) -> Result<Vec<ReportRow>> {
        let inner = &self.inner;

        if inner.keys.is_empty() {
            return Err(AbuseError::NoApiKeys);
        }

        let attempts = inner.retry.max_retries.max(1);
        let url = format!("{}{}", inner.base_url, CHECK_BLOCK_PATH);

        for attempt in 1..=attempts {
            let key = &inner.keys[inner.selector.pick(inner.keys.len())];
            debug!(network, attempt, url = %url, "check-block request");

            let response = inner
                .http
                .get(&url)
                .query(&[("network", network), ("maxAgeInDays", MAX_AGE_IN_DAYS)])
                .header("Key", key)
                .header("Accept", "application/json")
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(e) => {
                    if attempt == attempts {
                        return Err(AbuseError::RetriesExhausted {
                            network: network.to_string(),
                            attempts,
                            message: e.to_string(),
                        });
                    }
                    warn!(network, attempt, attempts, error = %e, "attempt failed, backing off");
                    tokio::time::sleep(inner.retry.backoff_for(attempt)).await;
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if attempt == attempts {
                    return Err(AbuseError::UnauthorizedExhausted {
                        network: network.to_string(),
                        attempts,
                    });
                }
                warn!(network, attempt, attempts, "401 response, rotating key");
                tokio::time::sleep(inner.retry.backoff_for(attempt)).await;
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(AbuseError::Api {
                    code: status.as_u16(),
                    message,
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| AbuseError::Http(e.to_string()))?;
            let parsed: CheckBlockResponse = serde_json::from_str(&body)?;

            let now = Utc::now();
            let rows: Vec<ReportRow> = parsed
                .data
                .reported_address
                .into_iter()
                .filter_map(|addr| addr.into_row(now))
                .collect();

            debug!(network, rows = rows.len(), "check-block complete");
            return Ok(rows);
        }

        Err(AbuseError::RetriesExhausted {
            network: network.to_string(),
            attempts,
            message: "no attempt completed".to_string(),
        })
    }
}

/// Builder for configuring an [`AbuseClient`]
pub struct AbuseClientBuilder {
    keys: Vec<String>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry: RetryConfig,
    selector: Box<dyn KeySelector>,
}

impl AbuseClientBuilder {
    /// Create a new builder over the given key set
    #[must_use]
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("abusewatch/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
            selector: Box::new(RandomSelector),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the key selection strategy
    #[must_use]
    pub fn key_selector(mut self, selector: impl KeySelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Build the client
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which only
    /// happens when the TLS backend is unavailable on the host.
    #[must_use]
    pub fn build(self) -> AbuseClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        AbuseClient {
            inner: Arc::new(ClientInner {
                http,
                keys: self.keys,
                base_url: self.base_url,
                retry: self.retry,
                selector: self.selector,
            }),
        }
    }
}
