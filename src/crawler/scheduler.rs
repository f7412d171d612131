//! Frontier and per-crawl state
//!
//! This module handles:
//! - Frontier queue management in FIFO or LIFO order
//! - The visited set, through the sitemap's path index
//! - Page state transitions as pages are fetched

use crate::config::FrontierOrder;
use crate::crawler::FetchError;
use crate::state::{NodeId, PageState, Sitemap};
use std::collections::VecDeque;

/// Pages discovered but not yet expanded
#[derive(Debug, Clone)]
pub struct Frontier {
    queue: VecDeque<NodeId>,
    order: FrontierOrder,
}

impl Frontier {
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            queue: VecDeque::new(),
            order,
        }
    }

    pub fn push(&mut self, id: NodeId) {
        self.queue.push_back(id);
    }

    /// Takes the next page to expand according to the frontier order
    pub fn pop(&mut self) -> Option<NodeId> {
        match self.order {
            FrontierOrder::Fifo => self.queue.pop_front(),
            FrontierOrder::Lifo => self.queue.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Everything a crawl mutates, owned by a single coordinator
///
/// Check-then-insert on the visited set happens inside `discover`, which
/// takes `&mut self`; concurrent discoveries of one path therefore cannot
/// both create a node.
#[derive(Debug)]
pub struct CrawlState {
    sitemap: Sitemap,
    frontier: Frontier,
}

impl CrawlState {
    /// Creates the state for a crawl starting at `start_path`
    ///
    /// The root page is registered as visited and queued.
    pub fn new(start_path: &str, order: FrontierOrder) -> Self {
        let sitemap = Sitemap::new(start_path);
        let mut frontier = Frontier::new(order);
        frontier.push(sitemap.root());

        Self { sitemap, frontier }
    }

    /// Pops the next page to fetch and marks it as fetching
    ///
    /// Returns the page's id and canonical path.
    pub fn next_page(&mut self) -> Option<(NodeId, String)> {
        let id = self.frontier.pop()?;
        self.sitemap.set_state(id, PageState::Fetching, None);
        Some((id, self.sitemap.node(id).path().to_string()))
    }

    /// Registers a link from `parent` to `path`
    ///
    /// A path seen for the first time becomes a new child of `parent` and is
    /// queued; a known path is ignored and `None` is returned.
    pub fn discover(&mut self, parent: NodeId, path: String) -> Option<NodeId> {
        let id = self.sitemap.attach(parent, path)?;
        self.frontier.push(id);
        Some(id)
    }

    /// Marks a page whose links have all been discovered
    pub fn complete(&mut self, id: NodeId) {
        self.sitemap.set_state(id, PageState::Processed, None);
    }

    /// Marks a page that could not be fetched; it keeps no children
    pub fn fail(&mut self, id: NodeId, error: &FetchError) {
        self.sitemap
            .set_state(id, error.page_state(), Some(error.to_string()));
    }

    /// Number of pages waiting in the frontier
    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    /// Number of distinct pages discovered so far
    pub fn discovered(&self) -> usize {
        self.sitemap.len()
    }

    pub fn sitemap(&self) -> &Sitemap {
        &self.sitemap
    }

    pub fn into_sitemap(self) -> Sitemap {
        self.sitemap
    }
}
