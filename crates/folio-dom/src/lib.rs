//! Folio DOM - Document Object Model
//!
//! Arena-backed DOM tree for the site's page sessions.
//! Nodes are addressed by [`NodeId`] (a 4 byte index) instead of pointers,
//! so a document can be unmounted and remounted without invalidating
//! anything the navigation layer holds on to.

mod interner;
mod node;
mod tree;
mod document;
mod selector;
mod geometry;

pub use interner::{InternedString, StringInterner};
pub use node::{Node, NodeData, ElementData};
pub use tree::{DomTree, DomError, DomResult, Children, Descendants};
pub use document::Document;
pub use selector::{Selector, SimpleSelector, SelectorError};
pub use geometry::{DOMRect, layout_blocks};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
