//! Arena-backed page tree
//!
//! Nodes live in a single vector and refer to each other by `NodeId`. A node
//! owns its children through the arena; its parent is a plain index, so the
//! tree never holds an ownership cycle.

use crate::state::PageState;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Index of a page in its `Sitemap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One discovered page
#[derive(Debug, Clone)]
pub struct PageNode {
    path: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    state: PageState,
    error: Option<String>,
}

impl PageNode {
    fn new(path: String, parent: Option<NodeId>) -> Self {
        Self {
            path,
            parent,
            children: Vec::new(),
            state: PageState::Discovered,
            error: None,
        }
    }

    /// Canonical path of the page
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The page that first linked here; `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Pages first discovered on this page, in discovery order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Why the page could not be expanded, if it failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Tree of the pages discovered by a crawl
///
/// Every canonical path maps to exactly one node. The path index doubles as
/// the crawl's visited set: `attach` only creates a node for a path it has
/// never seen.
#[derive(Debug, Clone)]
pub struct Sitemap {
    nodes: Vec<PageNode>,
    index: HashMap<String, NodeId>,
}

impl Sitemap {
    /// Creates a tree holding only the root page
    pub fn new(root_path: impl Into<String>) -> Self {
        let root_path = root_path.into();
        let mut index = HashMap::new();
        index.insert(root_path.clone(), NodeId(0));

        Self {
            nodes: vec![PageNode::new(root_path, None)],
            index,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node for `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this sitemap.
    pub fn node(&self, id: NodeId) -> &PageNode {
        &self.nodes[id.0]
    }

    /// Looks a page up by canonical path
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of distinct pages discovered
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a sitemap has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attaches `path` as the newest child of `parent`
    ///
    /// Returns `None` without touching the tree when `path` is already known,
    /// so the first page to link somewhere becomes its parent.
    pub fn attach(&mut self, parent: NodeId, path: String) -> Option<NodeId> {
        match self.index.entry(path) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let id = NodeId(self.nodes.len());
                self.nodes
                    .push(PageNode::new(slot.key().clone(), Some(parent)));
                self.nodes[parent.0].children.push(id);
                slot.insert(id);
                Some(id)
            }
        }
    }

    /// Records the outcome of expanding a page
    pub fn set_state(&mut self, id: NodeId, state: PageState, error: Option<String>) {
        let node = &mut self.nodes[id.0];
        node.state = state;
        node.error = error;
    }

    /// Number of links followed from the root to reach `id`
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Walks parent links from `id` up to and including the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).parent, move |current| {
            self.node(*current).parent
        })
    }

    /// Depth-first pre-order walk yielding each node with its depth
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            sitemap: self,
            stack: vec![(self.root(), 0)],
        }
    }

    /// Pages whose fetch failed, in creation order
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageNode> {
        self.nodes.iter().filter(|node| node.state.is_error())
    }

    /// Deepest level reached by the crawl
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(_, depth)| depth).max().unwrap_or(0)
    }
}

/// Pre-order iterator over a `Sitemap`
pub struct PreOrder<'a> {
    sitemap: &'a Sitemap,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let children = self.sitemap.node(id).children();
        self.stack
            .extend(children.iter().rev().map(|child| (*child, depth + 1)));
        Some((id, depth))
    }
}
