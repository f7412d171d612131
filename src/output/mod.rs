//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering the sitemap as an indented text tree
//! - Summarizing a finished crawl

mod sitemap;
pub mod stats;

pub use sitemap::{render_sitemap, write_sitemap};
pub use stats::{collect_statistics, print_statistics, CrawlStatistics};
