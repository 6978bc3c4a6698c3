//! Node entity: identity, parent link, payload and ordered children.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node, unique across the whole forest.
pub type NodeId = i64;

/// Tree node carrying an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<T> {
    /// Unique id, never reused while the node is live
    pub id: NodeId,
    /// Id of the containing node, None for root nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Payload, never interpreted by the tree logic
    pub data: T,
    /// Owned children in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// Create a detached node without children.
    pub fn new(id: NodeId, parent_id: Option<NodeId>, data: T) -> Self {
        Self {
            id,
            parent_id,
            data,
            children: Vec::new(),
        }
    }

    pub fn root(id: NodeId, data: T) -> Self {
        Self::new(id, None, data)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Depth-first search within this subtree, first match wins.
    pub fn find(&self, id: NodeId) -> Option<&Node<T>> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn child(&self, id: NodeId) -> Option<&Node<T>> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn child_ids(&self) -> Vec<NodeId> {
        self.children.iter().map(|c| c.id).collect()
    }
}

impl<T: Clone> Node<T> {
    /// Copy of the node without its children, as found in a flat list.
    pub fn detached(&self) -> Self {
        Self::new(self.id, self.parent_id, self.data.clone())
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<&'static str> {
        let mut root = Node::root(1, "a");
        let mut b = Node::new(2, Some(1), "b");
        b.children.push(Node::new(3, Some(2), "c"));
        root.children.push(b);
        root.children.push(Node::new(4, Some(1), "d"));
        root
    }

    #[test]
    fn subtree_size_counts_all_descendants() {
        assert_eq!(sample().subtree_size(), 4);
    }

    #[test]
    fn depth_of_leaf_is_one() {
        assert_eq!(Node::root(9, "x").depth(), 1);
        assert_eq!(sample().depth(), 3);
    }

    #[test]
    fn find_descends_into_children() {
        let root = sample();
        assert_eq!(root.find(3).map(|n| n.data), Some("c"));
        assert!(root.find(42).is_none());
    }
}
