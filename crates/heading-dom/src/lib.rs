//! Heading DOM - Document Object Model
//!
//! Arena-allocated DOM tree with the pieces heading level computation
//! needs: attributes, shadow roots, slot assignment, modal dialogs in the
//! top layer, and mutation observers with per-observer record queues.

mod dialog;
mod error;
mod node;
mod observer;
mod shadow;
mod tree;

pub use error::DomError;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use observer::{MutationObserverInit, MutationRecord, MutationType, ObserverId};
pub use shadow::{ShadowRootData, ShadowRootMode};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document)
    pub const ROOT: NodeId = NodeId(0);

    /// Null link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a null link into `None`
    #[inline]
    pub(crate) fn valid(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
