//! [SlotMap](https://crates.io/crates/slotmap)-backed trie of site paths.
//!
//! Intermediate directories missing from the input are created as
//! non-explicit nodes, so every path hangs below its ancestors.

pub mod iter;
mod status;

use slotmap::{new_key_type, Key, SlotMap};

pub use status::{effective_status, EffectiveStatus, StatusSource};

new_key_type! {
    pub struct NodeId;
}

/// Trie of path segments.
///
/// Always contains a root node standing for `/`, which is never explicit.
#[derive(Debug, Clone)]
pub struct PathTree {
    root: NodeId,
    sm: SlotMap<NodeId, PathNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    segment: String,
    full_path: String,
    is_explicit: bool,
    parent: NodeId,
    children: Vec<NodeId>,
}

impl PathNode {
    fn new(segment: &str, full_path: String, parent: NodeId) -> Self {
        PathNode {
            segment: segment.to_string(),
            full_path,
            is_explicit: false,
            parent,
            children: vec![],
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// True if this exact path was inserted, not only one of its descendants.
    pub fn is_explicit(&self) -> bool {
        self.is_explicit
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Owned snapshot of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTreeNode {
    pub segment: String,
    pub full_path: String,
    pub children: Vec<PathTreeNode>,
    pub is_explicit: bool,
}

impl Default for PathTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTree {
    /// Creates a tree with only its root node.
    pub fn new() -> Self {
        let mut sm = SlotMap::with_key();
        let root = sm.insert(PathNode::new("", String::from("/"), NodeId::null()));
        PathTree { root, sm }
    }

    /// Creates a tree holding every path of `paths`.
    pub fn build<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path.as_ref());
        }
        tree
    }

    /// Inserts `path` and its missing ancestors, returning the path's node.
    ///
    /// Empty segments are ignored, so `/blog/` and `/blog` share a node and
    /// `/` has none.
    pub fn insert(&mut self, path: &str) -> Option<NodeId> {
        let segments = split(path);
        if segments.is_empty() {
            return None;
        }

        let mut current = self.root;
        for (depth, segment) in segments.iter().enumerate() {
            current = match self.child_slot(current, segment) {
                Ok(id) => id,
                Err(pos) => {
                    let full_path = format!("/{}", segments[..=depth].join("/"));
                    let id = self.sm.insert(PathNode::new(segment, full_path, current));
                    self.sm[current].children.insert(pos, id);
                    id
                }
            };
        }

        self.sm[current].is_explicit = true;
        Some(current)
    }

    /// Returns the node for `path`, if present.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        split(path)
            .into_iter()
            .try_fold(self.root, |current, segment| {
                self.child_slot(current, segment).ok()
            })
            .filter(|id| *id != self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&PathNode> {
        self.sm.get(id)
    }

    /// Returns the parent of `id`, `None` for top-level nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.sm
            .get(id)
            .map(|node| node.parent)
            .filter(|parent| *parent != self.root && !parent.is_null())
    }

    /// Number of nodes, the root excluded.
    pub fn len(&self) -> usize {
        self.sm.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned copy of the top-level nodes and their subtrees.
    pub fn nodes(&self) -> Vec<PathTreeNode> {
        self.children(self.root)
            .map(|(id, _)| self.snapshot(id))
            .collect()
    }

    fn snapshot(&self, id: NodeId) -> PathTreeNode {
        let node = &self.sm[id];
        PathTreeNode {
            segment: node.segment.clone(),
            full_path: node.full_path.clone(),
            children: node.children.iter().map(|c| self.snapshot(*c)).collect(),
            is_explicit: node.is_explicit,
        }
    }

    /// Position of `segment` among the sorted children of `parent`.
    fn child_slot(&self, parent: NodeId, segment: &str) -> Result<NodeId, usize> {
        let children = &self.sm[parent].children;
        children
            .binary_search_by(|id| self.sm[*id].segment.as_str().cmp(segment))
            .map(|pos| children[pos])
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
