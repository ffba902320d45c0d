//! DOM errors

use crate::{NodeId, ObserverId};

/// Errors raised by tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist")]
    InvalidNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Element {0:?} already hosts a shadow root")]
    ShadowRootExists(NodeId),

    #[error("<{0}> cannot host a shadow root")]
    NotShadowHost(String),

    #[error("Observer {0:?} does not belong to this tree")]
    UnknownObserver(ObserverId),

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}
