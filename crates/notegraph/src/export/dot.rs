//! DOT format export for Graphviz visualization.

use super::check_export_size;
use crate::error::Result;
use crate::graph::{Edge, GraphStore, Node};
use std::collections::HashMap;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Fill colors keyed by node kind name (`note`, `tag`, ...)
    pub node_colors: HashMap<String, String>,
    /// Node shapes keyed by node kind name
    pub node_shapes: HashMap<String, String>,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Render pinned nodes at their fixed position (`pos="x,y!"`)
    pub pin_positions: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        let mut node_colors = HashMap::new();
        node_colors.insert("note".to_string(), "#90CAF9".to_string());
        node_colors.insert("tag".to_string(), "#A5D6A7".to_string());
        node_colors.insert("attachment".to_string(), "#FFE082".to_string());
        node_colors.insert("unresolved".to_string(), "#E0E0E0".to_string());

        let mut node_shapes = HashMap::new();
        node_shapes.insert("note".to_string(), "box".to_string());
        node_shapes.insert("tag".to_string(), "ellipse".to_string());
        node_shapes.insert("attachment".to_string(), "folder".to_string());
        node_shapes.insert("unresolved".to_string(), "box".to_string());

        DotOptions {
            node_colors,
            node_shapes,
            rankdir: "LR".to_string(),
            pin_positions: false,
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot(graph: &GraphStore) -> Result<String> {
    export_dot_styled(graph, DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
///
/// Edges to ids with no node are drawn too; Graphviz creates a plain node
/// for the missing endpoint.
pub fn export_dot_styled(graph: &GraphStore, options: DotOptions) -> Result<String> {
    check_export_size(graph)?;
    let mut output = String::new();

    output.push_str("digraph note_graph {\n");
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [style=filled];\n\n");

    let mut nodes: Vec<&Node> = graph.get_nodes();
    nodes.sort_by(|a, b| a.id().cmp(b.id()));
    for node in nodes {
        let kind = node.kind.as_str();
        let color = options
            .node_colors
            .get(kind)
            .map(|s| s.as_str())
            .unwrap_or("#FFFFFF");
        let shape = options
            .node_shapes
            .get(kind)
            .map(|s| s.as_str())
            .unwrap_or("box");
        let pos = match (options.pin_positions, node.fx, node.fy) {
            (true, Some(fx), Some(fy)) => format!(", pos=\"{fx},{fy}!\""),
            _ => String::new(),
        };

        output.push_str(&format!(
            "    \"{}\" [label=\"{}\", shape={shape}, fillcolor=\"{color}\"{pos}];\n",
            escape_dot_label(node.id()),
            escape_dot_label(&node.label),
        ));
    }

    output.push('\n');

    let mut edges: Vec<&Edge> = graph.get_edges();
    edges.sort_by(|a, b| a.id.cmp(&b.id));
    for edge in edges {
        output.push_str(&format!(
            "    \"{}\" -> \"{}\";\n",
            escape_dot_label(&edge.source_id),
            escape_dot_label(&edge.target_id)
        ));
    }

    output.push_str("}\n");

    Ok(output)
}

/// Escape special characters for DOT identifiers and labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
