//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree with the slice of the CSSOM needed to manage
//! `<style>` elements: every style element owns a [`StyleSheet`] whose
//! rule list can be read, grown and shrunk by index.

mod node;
mod tree;
mod document;
mod operations;
mod sheet;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::DomTree;
pub use document::Document;
pub use operations::{DomError, DomResult};
pub use sheet::StyleSheet;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
