//! URL handling module for Sumi-Sitemap
//!
//! This module decides which link targets belong to the crawled site and
//! reduces them to canonical paths, and validates the domain the crawl is
//! pointed at.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{authority, page_url, validate_domain};
pub use normalize::{normalize, strip_trailing_slash};
