//! Export module for handing the graph to layouts and external tools.
//!
//! Supports two formats:
//! - **JSON**: D3.js-style `nodes`/`links` snapshot, the shape force layouts consume
//! - **DOT**: Graphviz visualization

pub mod dot;
pub mod json;

pub use dot::{export_dot, export_dot_styled, DotOptions};
pub use json::{export_json, export_json_filtered};

use crate::error::{GraphError, Result};
use crate::graph::GraphStore;
use log::warn;

/// Graphs above this size are refused by the export functions.
pub const MAX_EXPORT_NODES: usize = 100_000;

/// Graphs above this size are exported with a warning.
pub const WARN_EXPORT_NODES: usize = 10_000;

/// Check graph size for export operations and issue warnings/errors.
pub(crate) fn check_export_size(graph: &GraphStore) -> Result<()> {
    let node_count = graph.node_count();

    if node_count > MAX_EXPORT_NODES {
        return Err(GraphError::InvalidOperation {
            message: format!(
                "Graph too large for export ({node_count} nodes > {MAX_EXPORT_NODES} limit). Filter the graph first."
            ),
        });
    }

    if node_count > WARN_EXPORT_NODES {
        warn!("Exporting large graph ({node_count} nodes). Consider filtering first.");
    }

    Ok(())
}
