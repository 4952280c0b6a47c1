//! Common error types for graph operations.

use crate::{EdgeId, NodeId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge not found.
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A node with this id already exists.
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// Malformed compact graph text.
    #[error("Invalid compact graph at offset {offset}: {message}")]
    InvalidCompact { offset: usize, message: String },
}

impl GraphError {
    pub fn invalid_compact(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidCompact {
            offset,
            message: message.into(),
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
