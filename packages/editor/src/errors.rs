//! Error types for the editor

use pagecraft_core::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("component '{0}' is not in the catalog")]
    UnknownComponent(String),

    #[error("component '{0}' does not allow children")]
    ChildrenNotAllowed(String),

    #[error("cannot drop '{dragged}' into its own subtree at '{target}'")]
    CycleDetected { dragged: NodeId, target: NodeId },
}
