//! Error types for layout passes and the reference host graph.

use thiserror::Error;

/// Failure of a layout pass or of a parameter update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The graph has no nodes, so there is nothing to place.
    #[error("the graph is empty")]
    EmptyGraph,

    /// A node has no readable position. The pass is aborted; tiers already
    /// stepped keep their new positions.
    #[error("node '{id}' has no position data")]
    MissingPosition { id: String },

    /// A parameter was rejected at the setter boundary.
    #[error("invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// `run_one_pass` was called while the layout is idle.
    #[error("the layout is not running")]
    NotRunning,
}

impl LayoutError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        LayoutError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Structural errors raised by [`crate::graph::MemoryGraph`].
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    #[error("node '{0}' does not exist")]
    UnknownNode(String),

    #[error("invalid graph input: {0}")]
    Json(#[from] serde_json::Error),
}
