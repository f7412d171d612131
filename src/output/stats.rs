//! Statistics for a finished crawl
//!
//! This module provides functionality for summarizing a sitemap and
//! displaying the summary as the crawl's completion message.

use crate::state::{PageState, Sitemap};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,

    /// Total number of distinct pages discovered
    pub total_pages: u64,

    /// Count of pages by state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Number of links followed from the root to the deepest page
    pub max_depth: usize,
}

impl CrawlStatistics {
    /// Pages that were fetched and expanded
    pub fn processed(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_success())
            .map(|(_, count)| count)
            .sum()
    }

    /// Pages that could not be fetched
    pub fn failed(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Pages fetched per second
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_pages as f64 / secs
        } else {
            0.0
        }
    }
}

/// Summarizes a finished crawl
///
/// # Arguments
///
/// * `sitemap` - The tree produced by the crawl
/// * `started_at` - When the crawl started
/// * `elapsed` - How long the crawl took
pub fn collect_statistics(
    sitemap: &Sitemap,
    started_at: DateTime<Utc>,
    elapsed: Duration,
) -> CrawlStatistics {
    let mut pages_by_state = HashMap::new();
    for (id, _) in sitemap.iter() {
        *pages_by_state.entry(sitemap.node(id).state()).or_insert(0) += 1;
    }

    CrawlStatistics {
        started_at,
        elapsed,
        total_pages: sitemap.len() as u64,
        pages_by_state,
        max_depth: sitemap.max_depth(),
    }
}

/// Prints the completion message to stdout
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("Fetching completed");
    println!(
        "  Started: {}",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Pages: {} ({} fetched, {} failed)",
        stats.total_pages,
        stats.processed(),
        stats.failed()
    );
    println!("  Deepest level: {}", stats.max_depth);
    println!(
        "  Duration: {:.2}s ({:.2} pages/sec)",
        stats.elapsed.as_secs_f64(),
        stats.rate()
    );
    println!();
}
