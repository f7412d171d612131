//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page content
//! - Error classification (network failure vs HTTP status)

use crate::config::{Config, Scheme};
use crate::state::PageState;
use crate::url::{authority, page_url};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Source of raw page content
///
/// The traversal engine only talks to this trait, so tests can crawl an
/// in-memory site.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `path` on `domain` and returns the response body
    async fn fetch(&self, domain: &str, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reasons a page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Classifies a transport error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            Self::Body(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }

    /// The page state a page ends up in after this error
    pub fn page_state(&self) -> PageState {
        match self {
            Self::Status { status } if *status == 404 || *status == 410 => PageState::DeadLink,
            Self::Timeout | Self::Connect(_) => PageState::Unreachable,
            _ => PageState::Failed,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_sitemap::config::Config;
/// use sumi_sitemap::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.crawler.fetch_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .https_only(config.crawler.scheme == Scheme::Https)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    scheme: Scheme,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            scheme: config.crawler.scheme,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Sends a GET for `scheme://domain + path`
    ///
    /// Redirects are followed wherever they lead; links on the final page are
    /// still resolved against `domain` by the caller. Responses that are not
    /// HTML are treated as pages without links and their bodies are not
    /// downloaded.
    async fn fetch(&self, domain: &str, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = page_url(self.scheme, domain, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        if authority(response.url()).as_deref() != Some(domain) {
            tracing::debug!("{} redirected to {}", url, response.url());
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !content_type.contains("html") {
            tracing::debug!("Not following links in {} ({})", url, content_type);
            return Ok(Vec::new());
        }

        let body = response.bytes().await.map_err(FetchError::from_reqwest)?;
        Ok(body.to_vec())
    }
}
