//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the pipeline, including:
//! - Building the pooled suggestion API client (TLS verification on)
//! - Building the site client (browser headers, TLS verification off)
//! - Connection-level retry with exponential backoff
//! - GET requests for company pages with per-call timeouts
//! - Error classification

use crate::config::{Config, HttpConfig};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client, RequestBuilder, Response};
use std::time::Duration;

/// Maximum redirect hops followed for a company page
const MAX_REDIRECTS: usize = 10;

/// Transport failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Other,
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered; the body is kept whatever the status code
    Page {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Network error (connection refused, timeout, TLS failure, unreadable body)
    NetworkError {
        /// Error description
        error: String,
        /// Failure class
        kind: NetworkErrorKind,
    },
}

/// Fetches a single page
///
/// The site scraper depends on this seam rather than on `reqwest` directly, so its
/// strategy can be exercised without a network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult;
}

/// Builds the default header set shared by both clients
fn default_headers(config: &HttpConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(accept) = HeaderValue::from_str(&config.accept) {
        headers.insert(ACCEPT, accept);
    }
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    }
    headers
}

/// Builds the pooled client used for every suggestion API call
///
/// TLS certificates are verified. Idle connections are kept alive and reused across
/// the whole batch.
///
/// # Example
///
/// ```no_run
/// use company_enricher::config::Config;
/// use company_enricher::crawler::build_api_client;
///
/// let client = build_api_client(&Config::default()).unwrap();
/// ```
pub fn build_api_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.http.user_agent.as_str())
        .default_headers(default_headers(&config.http))
        .timeout(config.suggestion.timeout())
        .connect_timeout(config.suggestion.timeout())
        .pool_max_idle_per_host(config.http.pool_max_idle_per_host)
        .tcp_keepalive(Duration::from_secs(60))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the client used to fetch company websites
///
/// Sends browser-like headers, follows redirects and, unless disabled in the config,
/// accepts invalid TLS certificates. No cookie store is attached, so nothing a site
/// sets is ever sent to another site.
pub fn build_site_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.http.user_agent.as_str())
        .default_headers(default_headers(&config.http))
        .danger_accept_invalid_certs(config.scraper.accept_invalid_certs)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .pool_max_idle_per_host(config.http.pool_max_idle_per_host)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a request, retrying only when the connection could not be established
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Connect error | Retry up to `retries` times, sleeping `backoff * 2^n` |
/// | Timeout | Return the error |
/// | Any HTTP status | Return the response |
///
/// Requests whose body cannot be cloned are sent once.
pub async fn send_with_retry(
    request: RequestBuilder,
    retries: u32,
    backoff: Duration,
) -> Result<Response, reqwest::Error> {
    let mut attempt: u32 = 0;

    loop {
        let Some(this_try) = request.try_clone() else {
            return request.send().await;
        };

        match this_try.send().await {
            Err(e) if e.is_connect() && attempt < retries => {
                let delay = backoff.saturating_mul(2u32.saturating_pow(attempt));
                tracing::debug!(
                    "Connect error ({}), retry {}/{} in {:?}",
                    e,
                    attempt + 1,
                    retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Classifies a transport error
fn classify_error(e: &reqwest::Error) -> NetworkErrorKind {
    if e.is_timeout() {
        NetworkErrorKind::Timeout
    } else if e.is_connect() {
        NetworkErrorKind::Connect
    } else {
        NetworkErrorKind::Other
    }
}

/// Fetches a URL and returns its body and final URL
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Deadline for the whole request, body included
///
/// # Returns
///
/// A FetchResult holding the page or the classified network error
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            let kind = classify_error(&e);
            tracing::debug!("GET {} failed ({:?}): {}", url, kind, e);
            return FetchResult::NetworkError {
                error: e.to_string(),
                kind,
            };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        tracing::debug!("GET {} returned {}, scanning body anyway", url, status);
    }

    match response.text().await {
        Ok(body) => FetchResult::Page {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
            kind: classify_error(&e),
        },
    }
}

/// [`PageFetcher`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with the site client described by `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_site_client(config)?,
        })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult {
        fetch_url(&self.client, url, timeout).await
    }
}
