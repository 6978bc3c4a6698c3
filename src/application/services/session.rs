//! Tree session: the single holder of the current forest snapshot.
//!
//! Readers get an `Arc` to a complete forest. Every committed mutation swaps
//! in a new snapshot; rejected ones leave the current snapshot in place.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{
    build_tree, parse_drag_payload, resolve_drop, DomainError, DomainResult, DropAction, Forest,
    Node, NodeId, Point, VisibleRow,
};

/// Result of a mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A new snapshot was committed
    Moved,
    /// The request was a no-op; the reason is informational
    Unchanged(Option<DomainError>),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// Owner of the "current tree" cell.
#[derive(Debug)]
pub struct TreeSession<T> {
    current: Arc<Forest<T>>,
    generation: u64,
}

impl<T> TreeSession<T> {
    pub fn new(forest: Forest<T>) -> Self {
        Self {
            current: Arc::new(forest),
            generation: 0,
        }
    }

    /// Build the initial snapshot from a flat node list.
    pub fn from_flat(nodes: Vec<Node<T>>) -> DomainResult<Self> {
        Ok(Self::new(build_tree(nodes)?))
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Forest<T>> {
        Arc::clone(&self.current)
    }

    pub fn forest(&self) -> &Forest<T> {
        &self.current
    }

    /// Number of committed snapshots since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn commit(&mut self, result: DomainResult<Forest<T>>) -> MoveOutcome {
        match result {
            Ok(next) => {
                self.current = Arc::new(next);
                self.generation += 1;
                debug!("committed snapshot generation {}", self.generation);
                MoveOutcome::Moved
            }
            Err(e) if e.is_not_found() => {
                debug!("stale event ignored: {}", e);
                MoveOutcome::Unchanged(Some(e))
            }
            Err(e) => {
                debug!("move rejected, snapshot unchanged: {}", e);
                MoveOutcome::Unchanged(Some(e))
            }
        }
    }
}

impl<T: Clone> TreeSession<T> {
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&mut self, id: NodeId, new_parent_id: NodeId) -> MoveOutcome {
        let result = self.current.move_node(id, new_parent_id);
        self.commit(result)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn move_node_to_root(&mut self, id: NodeId) -> MoveOutcome {
        let result = self.current.move_node_to_root(id);
        self.commit(result)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply_drop(&mut self, action: DropAction) -> MoveOutcome {
        match action {
            DropAction::Ignore => MoveOutcome::Unchanged(None),
            DropAction::MoveToRoot(id) => self.move_node_to_root(id),
            DropAction::MoveUnder { node, parent } => self.move_node(node, parent),
        }
    }

    /// Handle a complete drop gesture.
    ///
    /// `payload` is the dragged node id as text, `target` the node under the
    /// pointer (None when dropped outside every node) and `visible_rows` the
    /// rows rendered for that target's children.
    #[instrument(level = "debug", skip(self, visible_rows))]
    pub fn handle_drop(
        &mut self,
        payload: &str,
        target: Option<NodeId>,
        drop_point: Point,
        visible_rows: &[VisibleRow],
    ) -> MoveOutcome {
        let Some(dragged) = parse_drag_payload(payload) else {
            debug!("drag payload is not a node id: {:?}", payload);
            return MoveOutcome::Unchanged(None);
        };
        let action = resolve_drop(self.forest(), dragged, target, drop_point, visible_rows);
        debug!("drop resolved to {:?}", action);
        self.apply_drop(action)
    }
}
