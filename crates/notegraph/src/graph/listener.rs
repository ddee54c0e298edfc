//! Hooks for collaborators that hold resources per node/edge or lay out the graph.

use super::store::GraphStore;
use super::types::{Edge, Node};

/// Observer of a [`GraphStore`].
///
/// Renderers implement the release hooks to free whatever they attached to a
/// node or edge; layouts implement [`on_structure_changed`](Self::on_structure_changed)
/// and pull the current node/edge sets from the store they are handed.
/// All methods default to doing nothing.
pub trait GraphListener {
    /// A node left the store, through `remove_node` or `clear`.
    fn on_node_released(&mut self, _node: &Node) {}

    /// An edge left the store, through `remove_edge`, a cascading node
    /// removal, or `clear`.
    fn on_edge_released(&mut self, _edge: &Edge) {}

    /// A builder finished a batch of mutations.
    fn on_structure_changed(&mut self, _graph: &GraphStore) {}
}
