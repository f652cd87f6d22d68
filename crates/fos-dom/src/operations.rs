//! DOM Node Operations
//!
//! Error type shared by tree mutation and CSSOM rule-list access.

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
    /// Rule index outside the rule list
    #[error("Index {index} is out of range for {len} rules")]
    IndexSize { index: usize, len: usize },
}
