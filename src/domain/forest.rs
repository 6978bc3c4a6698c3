//! Forest: the persistent tree value and its mutations.
//!
//! Every mutating operation borrows the forest and returns a new one, so a
//! snapshot handed to a reader never changes underneath it.

use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeId};

/// Ordered sequence of root nodes, each the head of a nested tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest<T> {
    roots: Vec<Node<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<T> Forest<T> {
    /// Wrap already nested roots.
    ///
    /// No validation happens here; use `build_tree` for flat input.
    pub fn from_roots(roots: Vec<Node<T>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node<T>] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Node<T>> {
        self.roots
    }

    pub fn root_ids(&self) -> Vec<NodeId> {
        self.roots.iter().map(|n| n.id).collect()
    }

    /// Total number of nodes across all trees.
    pub fn len(&self) -> usize {
        self.roots.iter().map(Node::subtree_size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Height of the tallest tree, 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.roots.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Pre-order traversal yielding `(depth, node)`, roots at depth 0.
    pub fn iter(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(&self.roots)
    }

    /// Node ids in pre-order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(|(_, node)| node.id).collect()
    }

    /// Depth-first search, first match wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find_node(&self, id: NodeId) -> Option<&Node<T>> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find_node(id).is_some()
    }

    /// Size of the subtree rooted at `id`, None if absent.
    pub fn subtree_size(&self, id: NodeId) -> Option<usize> {
        self.find_node(id).map(Node::subtree_size)
    }

    /// True if `potential_ancestor` is found walking up from `node` via parent ids.
    ///
    /// The walk is bounded by the node count, so inconsistent parent links
    /// cannot make it loop.
    #[instrument(level = "trace", skip(self))]
    pub fn is_descendant_of(&self, node: NodeId, potential_ancestor: NodeId) -> bool {
        let mut current = self
            .find_node(node)
            .and_then(|n| n.parent_id)
            .and_then(|parent| self.find_node(parent));
        let mut remaining = self.len();
        while let Some(ancestor) = current {
            if ancestor.id == potential_ancestor {
                return true;
            }
            if remaining == 0 {
                debug!("parent chain of {} does not terminate", node);
                return false;
            }
            remaining -= 1;
            current = ancestor.parent_id.and_then(|parent| self.find_node(parent));
        }
        false
    }

    /// True iff the immediate parent of `node` resolves to `potential_parent`.
    pub fn is_direct_descendant_of(&self, node: NodeId, potential_parent: NodeId) -> bool {
        self.find_node(node)
            .and_then(|n| n.parent_id)
            .and_then(|parent| self.find_node(parent))
            .is_some_and(|parent| parent.id == potential_parent)
    }

    /// Check id uniqueness and that every parent id matches the containing node.
    pub fn is_consistent(&self) -> bool {
        fn walk<T>(nodes: &[Node<T>], parent: Option<NodeId>, seen: &mut HashSet<NodeId>) -> bool {
            nodes.iter().all(|node| {
                node.parent_id == parent
                    && seen.insert(node.id)
                    && walk(&node.children, Some(node.id), seen)
            })
        }
        walk(&self.roots, None, &mut HashSet::new())
    }

    /// Why `id` cannot be moved under `new_parent_id`, if it cannot.
    pub fn check_move(&self, id: NodeId, new_parent_id: NodeId) -> DomainResult<()> {
        if !self.contains(id) {
            return Err(DomainError::NotFound(id));
        }
        if !self.contains(new_parent_id) {
            return Err(DomainError::NotFound(new_parent_id));
        }
        if id == new_parent_id {
            return Err(DomainError::SelfParent(id));
        }
        if self.is_direct_descendant_of(id, new_parent_id) {
            return Err(DomainError::AlreadyChild {
                node: id,
                parent: new_parent_id,
            });
        }
        if self.is_descendant_of(new_parent_id, id) {
            return Err(DomainError::CycleDetected {
                node: id,
                parent: new_parent_id,
            });
        }
        Ok(())
    }

    fn find_node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        fn search<T>(nodes: &mut [Node<T>], id: NodeId) -> Option<&mut Node<T>> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = search(&mut node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        search(&mut self.roots, id)
    }

    fn detach(nodes: &mut Vec<Node<T>>, id: NodeId) -> Option<Node<T>> {
        if let Some(pos) = nodes.iter().position(|n| n.id == id) {
            return Some(nodes.remove(pos));
        }
        nodes
            .iter_mut()
            .find_map(|node| Self::detach(&mut node.children, id))
    }
}

impl<T: Clone> Forest<T> {
    /// Detach `id` together with its subtree.
    ///
    /// Returns the new forest and the removed node; an absent id yields an
    /// unchanged copy and None.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_node(&self, id: NodeId) -> (Forest<T>, Option<Node<T>>) {
        let mut next = self.clone();
        let removed = Self::detach(&mut next.roots, id);
        if removed.is_none() {
            trace!("remove_node: {} not found", id);
        }
        (next, removed)
    }

    /// Detach `id` and append it, parent cleared, as the last root.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node_to_root(&self, id: NodeId) -> DomainResult<Forest<T>> {
        let (mut next, removed) = self.remove_node(id);
        let mut node = removed.ok_or(DomainError::NotFound(id))?;
        node.parent_id = None;
        next.roots.push(node);
        debug!("moved {} to root", id);
        Ok(next)
    }

    /// Detach `id` and append it as the last child of `new_parent_id`.
    ///
    /// Rejected when either id is absent, when the node would become its own
    /// parent, when it already is a direct child of the target, or when the
    /// target lies inside the moving subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&self, id: NodeId, new_parent_id: NodeId) -> DomainResult<Forest<T>> {
        self.check_move(id, new_parent_id)?;

        let (mut next, removed) = self.remove_node(id);
        let mut node = removed.ok_or(DomainError::NotFound(id))?;
        node.parent_id = Some(new_parent_id);
        next.find_node_mut(new_parent_id)
            .ok_or(DomainError::NotFound(new_parent_id))?
            .children
            .push(node);
        debug!("moved {} under {}", id, new_parent_id);
        Ok(next)
    }

    /// Pre-order flat list with children stripped, suitable for rebuilding.
    pub fn flatten(&self) -> Vec<Node<T>> {
        self.iter().map(|(_, node)| node.detached()).collect()
    }
}

/// Stack-based pre-order iterator over a forest.
pub struct PreOrderIter<'a, T> {
    stack: Vec<(usize, &'a Node<T>)>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(roots: &'a [Node<T>]) -> Self {
        let stack = roots.iter().rev().map(|root| (0, root)).collect();
        Self { stack }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (usize, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

impl<'a, T> IntoIterator for &'a Forest<T> {
    type Item = (usize, &'a Node<T>);
    type IntoIter = PreOrderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
