//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Single GET requests with redirects disabled
//! - Classifying failures that never produced a response

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered, whatever the status
    Response {
        /// HTTP status code (3xx is reported as-is, never followed)
        status_code: u16,
        /// Content-Type header value, if the server sent one
        content_type: Option<String>,
        /// Response body
        body: Vec<u8>,
    },

    /// Network error (DNS failure, connection refused, timeout, TLS, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the response carries an HTML or XHTML document
    ///
    /// A response without a Content-Type header is treated as HTML.
    pub fn is_html(&self) -> bool {
        match self {
            Self::Response { content_type, .. } => content_type.as_deref().map_or(true, |ct| {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml+xml")
            }),
            Self::NetworkError { .. } => false,
        }
    }
}

/// Anything that can retrieve a URL for the crawler
///
/// Implementations must not follow redirects.
pub trait Fetcher {
    /// Performs one GET request
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, Duration::from_secs(crawler.request_timeout))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send {
        let client = self.client.clone();
        let url = url.to_string();
        async move { fetch_url(&client, &url).await }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total time allowed for one request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_sweep::config::UserAgentConfig;
/// use site_sweep::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "site-sweep".to_string(),
///     crawler_version: "0.1.0".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, without retries or redirects
///
/// Every answer from the server, whatever the status, becomes `FetchResult::Response`.
/// Only failures that leave no response become `FetchResult::NetworkError`.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_network_error(&e),
    };

    let status_code = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string());

    match response.bytes().await {
        Ok(body) => FetchResult::Response {
            status_code,
            content_type,
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
        },
    }
}

fn classify_network_error(error: &reqwest::Error) -> FetchResult {
    let error = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_builder() {
        format!("Invalid request: {}", error)
    } else {
        error.to_string()
    };

    FetchResult::NetworkError { error }
}
