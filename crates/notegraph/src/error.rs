//! Error types for notegraph operations.
//!
//! Only integrity violations and configuration decoding are errors. Lookups of
//! unknown ids return `Option`/empty results and query text that fails to parse
//! yields `None`, so neither shows up here.

use thiserror::Error;

/// Result type alias for notegraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for graph store and configuration operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A node with this id is already in the store.
    #[error("Duplicate node id: {node_id}")]
    DuplicateNode {
        /// Id that was inserted twice
        node_id: String,
    },

    /// An edge with this id is already in the store.
    #[error("Duplicate edge id: {edge_id}")]
    DuplicateEdge {
        /// Id that was inserted twice
        edge_id: String,
    },

    /// Invalid operation (e.g., exporting an oversized graph)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Whether this error reports a duplicate node or edge id.
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::DuplicateNode { .. } | Self::DuplicateEdge { .. })
    }
}
