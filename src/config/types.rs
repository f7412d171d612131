use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Main configuration structure for Sumi-Sitemap
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of page fetches in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Upper bound for a single fetch, in seconds
    #[serde(rename = "fetch-timeout")]
    pub fetch_timeout: u64,

    /// Upper bound for establishing a connection, in seconds
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// Order in which discovered pages are expanded
    #[serde(rename = "frontier-order")]
    pub frontier_order: FrontierOrder,

    /// Abort the whole crawl on the first page that cannot be fetched
    #[serde(rename = "fail-fast")]
    pub fail_fast: bool,

    /// Scheme used to build page URLs from the domain argument
    pub scheme: Scheme,
}

impl CrawlerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            fetch_timeout: 30,
            connect_timeout: 10,
            frontier_order: FrontierOrder::Fifo,
            fail_fast: false,
            scheme: Scheme::Https,
        }
    }
}

/// Frontier discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontierOrder {
    /// Oldest discovery first: a true breadth-first crawl
    #[default]
    Fifo,
    /// Newest discovery first: depth-first expansion
    Lifo,
}

/// URL scheme for page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiSitemap".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}
