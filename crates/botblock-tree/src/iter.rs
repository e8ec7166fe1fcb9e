use std::slice;

use crate::{NodeId, PathNode, PathTree};

/// Iterator over the children of a node, sorted by segment.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    tree: &'a PathTree,
    ids: slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a PathNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        self.tree.get(id).map(|node| (id, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Children<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next_back()?;
        self.tree.get(id).map(|node| (id, node))
    }
}

/// Depth-first, pre-order iterator over every node below the root.
///
/// Yields the depth of each node, top-level nodes being at depth 0.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a PathTree,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a PathNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.tree.get(id)?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, *child)));
        Some((depth, node))
    }
}

impl PathTree {
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let ids = self
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default();
        Children {
            tree: self,
            ids: ids.iter(),
        }
    }

    pub fn descendants(&self) -> Descendants<'_> {
        let stack = self
            .children(self.root())
            .rev()
            .map(|(id, _)| (0, id))
            .collect();
        Descendants { tree: self, stack }
    }
}
