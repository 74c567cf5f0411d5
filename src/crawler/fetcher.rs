//! HTTP fetcher implementation
//!
//! This module defines the `Fetch` collaborator seam the coordinator works
//! against, plus the production implementation over `reqwest`:
//! - Building the HTTP client with a proper user agent string
//! - GET requests with status and error classification
//! - The content-type gate, applied before the body is downloaded

use crate::config::{Config, UserAgentConfig};
use crate::crawler::content_type::is_crawlable;
use crate::url::Address;
use crate::KumoError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Successfully fetched a crawlable page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// The response is not in the content-type allow-list; body not read
    NotCrawlable {
        /// The actual Content-Type received
        content_type: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS failure, connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// The fetch collaborator: retrieves content and metadata for one address.
///
/// The coordinator is generic over this trait so tests can substitute
/// in-memory sites; [`HttpFetcher`] is the production implementation. An
/// implementation must always resolve to a `FetchResult`, classifying
/// errors into variants instead of propagating them: the coordinator's
/// termination counter depends on every fetch producing exactly one
/// report.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, address: &Address) -> impl Future<Output = FetchResult> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent_string())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher over a `reqwest::Client`
///
/// Redirects are followed transparently by the client (default policy,
/// at most 10 hops); the visited key stays the requested address.
pub struct HttpFetcher {
    client: Client,
    allowed_content_types: Vec<String>,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawl configuration
    pub fn new(config: &Config) -> Result<Self, KumoError> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self {
            client,
            allowed_content_types: config.crawler.allowed_content_types.clone(),
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, address: &Address) -> FetchResult {
        let response = match self.client.get(address.as_str()).send().await {
            Ok(response) => response,
            Err(e) => return classify_error(&e),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Gate before reading the body so non-HTML payloads are never
        // downloaded
        if !is_crawlable(&content_type, &self.allowed_content_types) {
            return FetchResult::NotCrawlable { content_type };
        }

        match response.text().await {
            Ok(body) => FetchResult::Success {
                status_code: status.as_u16(),
                content_type,
                body,
            },
            Err(e) => FetchResult::NetworkError {
                error: e.to_string(),
            },
        }
    }
}

/// Classifies a transport-level error into a readable description
fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
