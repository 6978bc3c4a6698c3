//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors describe why a lookup or move was not carried out.
///
/// None of these is fatal: the session turns them into no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NotFound(NodeId),

    #[error("node cannot become its own parent: {0}")]
    SelfParent(NodeId),

    #[error("node {node} is already a direct child of {parent}")]
    AlreadyChild { node: NodeId, parent: NodeId },

    #[error("moving node {node} under {parent} would create a cycle")]
    CycleDetected { node: NodeId, parent: NodeId },

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),
}

impl DomainError {
    /// Lookup misses, as opposed to structurally invalid moves.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            DomainError::SelfParent(_)
                | DomainError::AlreadyChild { .. }
                | DomainError::CycleDetected { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
