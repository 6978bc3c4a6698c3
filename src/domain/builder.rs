//! Tree builder: assembles a flat node list into a nested forest.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::forest::Forest;
use crate::domain::node::{Node, NodeId};

/// Build a forest from a flat list of nodes.
///
/// Shorthand for `TreeBuilder::new().build(nodes)`.
pub fn build_tree<T>(nodes: Vec<Node<T>>) -> DomainResult<Forest<T>> {
    TreeBuilder::new().build(nodes)
}

/// Constructs nested trees from flat node lists.
///
/// Children are looked up through a parent-id index built once per call,
/// so building is linear in the number of nodes.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// Nodes whose parent did not resolve and were promoted to roots
    promoted: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids promoted to root by the last `build` call, in promotion order.
    pub fn promoted(&self) -> &[NodeId] {
        &self.promoted
    }

    /// Build a forest from `nodes`.
    ///
    /// Roots are nodes without a parent and nodes whose parent id matches no
    /// node in the list. Roots and siblings keep input order. Children already
    /// attached to input nodes are discarded.
    ///
    /// Attachment, lookup and detach recurse once per tree level, so nesting
    /// is bounded by the thread's stack. Chains of a few thousand levels are
    /// fine; chains of hundreds of thousands overflow a default 8 MiB stack.
    #[instrument(level = "debug", skip_all, fields(count = nodes.len()))]
    pub fn build<T>(&mut self, nodes: Vec<Node<T>>) -> DomainResult<Forest<T>> {
        self.promoted.clear();

        let mut ids = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !ids.insert(node.id) {
                return Err(DomainError::DuplicateId(node.id));
            }
        }

        let mut slots: Vec<Option<Node<T>>> = nodes
            .into_iter()
            .map(|mut node| {
                node.children.clear();
                if let Some(parent) = node.parent_id {
                    if !ids.contains(&parent) {
                        debug!("orphan {} (parent {} missing) promoted to root", node.id, parent);
                        self.promoted.push(node.id);
                        node.parent_id = None;
                    }
                }
                Some(node)
            })
            .collect();

        // parent id -> child slots, in input order
        let children_index: HashMap<NodeId, Vec<usize>> = slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.as_ref()
                    .and_then(|node| node.parent_id)
                    .map(|parent| (parent, idx))
            })
            .into_group_map();

        let root_slots: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(Node::is_root))
            .map(|(idx, _)| idx)
            .collect();

        let mut roots = Vec::with_capacity(root_slots.len());
        for idx in root_slots {
            if let Some(root) = Self::attach(idx, &mut slots, &children_index) {
                roots.push(root);
            }
        }

        // Whatever is left hangs off a parent cycle: break it at the first node.
        while let Some(idx) = slots.iter().position(Option::is_some) {
            if let Some(node) = slots[idx].as_mut() {
                debug!(
                    "node {} unreachable from any root (parent cycle), promoted to root",
                    node.id
                );
                self.promoted.push(node.id);
                node.parent_id = None;
            }
            if let Some(root) = Self::attach(idx, &mut slots, &children_index) {
                roots.push(root);
            }
        }

        let forest = Forest::from_roots(roots);
        debug!("built forest: {} roots, {} nodes", forest.roots().len(), forest.len());
        Ok(forest)
    }

    fn attach<T>(
        idx: usize,
        slots: &mut [Option<Node<T>>],
        children_index: &HashMap<NodeId, Vec<usize>>,
    ) -> Option<Node<T>> {
        let mut node = slots[idx].take()?;
        trace!("attach {}", node.id);
        if let Some(child_slots) = children_index.get(&node.id) {
            for &child_idx in child_slots {
                if let Some(child) = Self::attach(child_idx, slots, children_index) {
                    node.children.push(child);
                }
            }
        }
        Some(node)
    }
}
