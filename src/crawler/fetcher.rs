//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the HTTP client from configuration
//! - The `Transport` seam used by the listing and detail stages
//! - Classifying responses and network errors

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// A response body fetched successfully
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response body
    pub body: String,
}

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success(FetchedPage),

    /// Server answered with a non-success status
    HttpError {
        /// The URL that was requested
        url: String,
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// The URL that was requested
        url: String,
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// The URL this result was requested for
    pub fn url(&self) -> &str {
        match self {
            Self::Success(page) => &page.url,
            Self::HttpError { url, .. } | Self::NetworkError { url, .. } => url,
        }
    }

    /// Returns true if the server rejected the request with HTTP 429
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::HttpError { status_code, .. }
                if *status_code == StatusCode::TOO_MANY_REQUESTS.as_u16()
        )
    }
}

/// Capability to fetch a URL
///
/// Implementations never fail outright: every outcome is reported through
/// `FetchResult` so one bad request cannot abort its siblings.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// `Transport` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport from HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use frame_tally::config::HttpConfig;
/// use frame_tally::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout | `NetworkError` |
/// | Connection refused | `NetworkError` |
/// | Body read failure | `NetworkError` |
///
/// Redirects are followed by the client; `FetchedPage::url` keeps the
/// requested URL and `final_url` the one that answered.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    url: url.to_string(),
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success(FetchedPage {
                    url: url.to_string(),
                    final_url,
                    status_code: status.as_u16(),
                    body,
                }),
                Err(e) => FetchResult::NetworkError {
                    url: url.to_string(),
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };

            FetchResult::NetworkError {
                url: url.to_string(),
                error,
            }
        }
    }
}
