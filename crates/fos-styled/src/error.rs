//! Registry errors

use fos_dom::DomError;

/// Result alias for registry operations
pub type StyleResult<T> = Result<T, StyleError>;

/// Errors surfaced by [`StyleRegistry`](crate::StyleRegistry)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// Remove or update for an id with no live instance
    #[error("style `{0}` is not mounted")]
    NotMounted(String),
    /// Counted id without a tag entry
    #[error("style `{0}` has no tag entry")]
    MissingTag(String),
    /// Shared range released before the shared sheet exists
    #[error("shared style sheet has not been created")]
    NoSharedSheet,
    /// Host document rejected an operation
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
