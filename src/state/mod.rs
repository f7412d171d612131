//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual pages (discovered, fetching, processed, failed)
//! - `Sitemap`: Arena-backed tree of discovered pages, indexed by canonical path

mod page_state;
mod sitemap;

// Re-export main types
pub use page_state::PageState;
pub use sitemap::{NodeId, PageNode, PreOrder, Sitemap};
