//! Sumi-Sitemap: a single-domain sitemap builder
//!
//! This crate crawls every page reachable from a site's root path without
//! leaving the site's domain, and renders the discovered link structure as an
//! indented sitemap.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch {path}: {source}")]
    Fetch {
        path: String,
        source: crawler::FetchError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Crawl worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Crawl cancelled before completion")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

/// Reasons a link target is not followed
///
/// None of these are failures of the crawl; they classify links the crawler
/// does not consider part of the site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("Malformed link target: {0}")]
    MalformedTarget(String),

    #[error("Link points to another host: {0}")]
    CrossDomain(String),

    #[error("Link target has an empty path")]
    EmptyPath,

    #[error("Dot-relative links are not followed")]
    RelativeDot,

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for link normalization
pub type NormalizeResult<T> = std::result::Result<T, Rejected>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator, HtmlLinkExtractor, HttpFetcher};
pub use state::{NodeId, PageNode, PageState, Sitemap};
pub use url::{normalize, validate_domain};
