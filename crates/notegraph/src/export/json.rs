//! JSON snapshot export for force layouts and web visualization tools.
//!
//! Generates JSON with "nodes" and "links" arrays in the shape D3.js
//! force-directed layouts expect. Nodes and links are sorted by id. Links
//! whose endpoints are not both exported are left out, since layouts cannot
//! place them.

use super::check_export_size;
use crate::error::{GraphError, Result};
use crate::graph::{Edge, GraphStore, Node};
use serde_json::{json, Value};
use std::collections::HashSet;

/// Export the whole graph to D3.js-compatible JSON.
///
/// # Errors
///
/// Returns [`GraphError::InvalidOperation`] for graphs over the export limit.
pub fn export_json(graph: &GraphStore) -> Result<String> {
    export_json_filtered(graph, |_| true)
}

/// Export the nodes accepted by `node_filter`, and the links between them.
///
/// The size limit applies to the whole store, before filtering.
pub fn export_json_filtered(
    graph: &GraphStore,
    node_filter: impl Fn(&Node) -> bool,
) -> Result<String> {
    check_export_size(graph)?;
    let mut nodes: Vec<&Node> = graph.get_nodes().into_iter().filter(|n| node_filter(n)).collect();
    nodes.sort_by(|a, b| a.id().cmp(b.id()));
    let exported: HashSet<&str> = nodes.iter().map(|n| n.id()).collect();

    let mut edges: Vec<&Edge> = graph
        .get_edges()
        .into_iter()
        .filter(|e| exported.contains(e.source_id.as_str()) && exported.contains(e.target_id.as_str()))
        .collect();
    edges.sort_by(|a, b| a.id.cmp(&b.id));

    let result = json!({
        "nodes": nodes.iter().map(|n| node_to_json(n)).collect::<Vec<_>>(),
        "links": edges.iter().map(|e| edge_to_json(e)).collect::<Vec<_>>(),
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize graph", Some(e)))
}

/// Convert node to JSON object
fn node_to_json(node: &Node) -> Value {
    let mut obj = json!({
        "id": node.id(),
        "label": node.label,
        "kind": node.kind.as_str(),
        "classes": node.classes,
        "x": node.x,
        "y": node.y,
    });
    if let (Some(fx), Some(fy)) = (node.fx, node.fy) {
        obj["fx"] = json!(fx);
        obj["fy"] = json!(fy);
    }
    obj
}

/// Convert edge to JSON object
fn edge_to_json(edge: &Edge) -> Value {
    json!({
        "id": edge.id,
        "source": edge.source_id,
        "target": edge.target_id,
    })
}
