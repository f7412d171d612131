//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - HTML link extraction behind the `LinkExtractor` trait
//! - Frontier and visited-set management
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{Coordinator, ProgressCallback};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use parser::{extract_hrefs, HtmlLinkExtractor, LinkExtractor};
pub use scheduler::{CrawlState, Frontier};

use crate::config::Config;
use crate::state::Sitemap;
use crate::SitemapError;

/// Path every crawl starts from
pub const ROOT_PATH: &str = "/";

/// Runs a complete crawl of `domain` over HTTP
///
/// This is the main entry point for building a sitemap. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Expand pages breadth-first from the root path
/// 3. Return the tree of every page reached
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `domain` - The bare domain to crawl, already validated
///
/// # Example
///
/// ```no_run
/// use sumi_sitemap::config::Config;
/// use sumi_sitemap::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sitemap = crawl(&Config::default(), "example.com").await?;
/// println!("{} pages", sitemap.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, domain: &str) -> Result<Sitemap, SitemapError> {
    Coordinator::from_config(config)?
        .crawl(domain, ROOT_PATH)
        .await
}
