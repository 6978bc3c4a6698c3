//! Expand/collapse state and row flattening for a host list widget.
//!
//! Expansion is caller-owned and lives beside the forest, never on nodes.

use std::collections::HashSet;

use crate::domain::drop::{Point, VisibleRow};
use crate::domain::forest::Forest;
use crate::domain::node::{Node, NodeId};

/// Set of expanded node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet {
    ids: HashSet<NodeId>,
}

impl ExpandedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn expand(&mut self, id: NodeId) {
        self.ids.insert(id);
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.ids.remove(&id);
    }

    /// Flip the state of `id`; returns true if it is now expanded.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Expand every node that has children.
    pub fn expand_all<T>(&mut self, forest: &Forest<T>) {
        self.ids.extend(
            forest
                .iter()
                .filter(|(_, node)| !node.is_leaf())
                .map(|(_, node)| node.id),
        );
    }

    /// Forget ids that are no longer in `forest`.
    pub fn retain_present<T>(&mut self, forest: &Forest<T>) {
        self.ids.retain(|id| forest.contains(*id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<NodeId> for ExpandedSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a, T> {
    pub node: &'a Node<T>,
    pub depth: usize,
    pub expanded: bool,
}

impl<T> RowView<'_, T> {
    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn has_children(&self) -> bool {
        !self.node.is_leaf()
    }
}

/// Rows a list shows: pre-order, skipping children of collapsed nodes.
pub fn visible_rows<'a, T>(forest: &'a Forest<T>, expanded: &ExpandedSet) -> Vec<RowView<'a, T>> {
    fn push<'a, T>(
        node: &'a Node<T>,
        depth: usize,
        expanded: &ExpandedSet,
        rows: &mut Vec<RowView<'a, T>>,
    ) {
        let is_expanded = expanded.is_expanded(node.id);
        rows.push(RowView {
            node,
            depth,
            expanded: is_expanded,
        });
        if is_expanded {
            for child in &node.children {
                push(child, depth + 1, expanded, rows);
            }
        }
    }

    let mut rows = Vec::new();
    for root in forest.roots() {
        push(root, 0, expanded, &mut rows);
    }
    rows
}

/// Stack rows vertically, `row_height` apart, starting at the origin.
pub fn layout_rows<T>(rows: &[RowView<'_, T>], row_height: f32) -> Vec<VisibleRow> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| VisibleRow::new(row.id(), Point::new(0.0, idx as f32 * row_height)))
        .collect()
}
