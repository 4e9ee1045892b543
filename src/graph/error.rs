//! Graph-scene error types.

use thiserror::Error;

use crate::graph::id::{ConnectionId, NodeId, PortId};

/// Errors for host-facing scene operations that take handles.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("unknown port {0:?}")]
    UnknownPort(PortId),

    #[error("unknown connection {0}")]
    UnknownConnection(ConnectionId),
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
