//! Query-facing view of a single node.

use super::QuerySet;
use crate::graph::{GraphStore, Node, NoteAttributes};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A node as seen by queries: its id, its connectivity, and its note attributes.
///
/// Holds two borrows and nothing else, so predicates create these freely.
/// Equality, ordering and hashing use the node id only.
#[derive(Debug, Clone, Copy)]
pub struct QueryableNode<'g> {
    graph: &'g GraphStore,
    node: &'g Node,
}

impl<'g> QueryableNode<'g> {
    /// Wrap a node of `graph`.
    pub fn new(graph: &'g GraphStore, node: &'g Node) -> Self {
        Self { graph, node }
    }

    /// Wrap the node with this id, if the store has one.
    pub fn from_id(graph: &'g GraphStore, id: &str) -> Option<Self> {
        graph.get_node(id).map(|node| Self::new(graph, node))
    }

    /// The node id.
    pub fn id(&self) -> &'g str {
        self.node.id()
    }

    /// The wrapped node.
    pub fn node(&self) -> &'g Node {
        self.node
    }

    /// True if an edge leads from this node to `other`.
    pub fn connects_to_node(&self, other: &QueryableNode<'_>) -> bool {
        self.graph
            .get_connected_edges(self.id())
            .iter()
            .filter_map(|edge_id| self.graph.get_edge(edge_id))
            .any(|edge| edge.source_id == self.id() && edge.target_id == other.id())
    }

    /// True if an edge leads from `other` to this node.
    pub fn is_connected_to_by(&self, other: &QueryableNode<'_>) -> bool {
        self.graph
            .get_connected_edges(self.id())
            .iter()
            .filter_map(|edge_id| self.graph.get_edge(edge_id))
            .any(|edge| edge.source_id == other.id() && edge.target_id == self.id())
    }

    /// True if an edge joins this node and `other` in either direction.
    pub fn has_connection_with(&self, other: &QueryableNode<'_>) -> bool {
        self.connects_to_node(other) || self.is_connected_to_by(other)
    }

    /// Targets of this node's outgoing edges.
    pub fn nodes_it_connects_to(&self) -> QuerySet<'g> {
        let graph = self.graph;
        graph
            .get_connected_edges(self.id())
            .iter()
            .filter_map(|edge_id| graph.get_edge(edge_id))
            .filter(|edge| edge.source_id == self.id())
            .filter_map(|edge| Self::from_id(graph, &edge.target_id))
            .collect()
    }

    /// Nodes joined to this node by an edge in either direction.
    pub fn connected_nodes(&self) -> QuerySet<'g> {
        let graph = self.graph;
        graph
            .neighbors(self.id())
            .iter()
            .filter_map(|id| Self::from_id(graph, id))
            .collect()
    }

    /// Number of edges touching this node.
    pub fn degree(&self) -> usize {
        self.graph.degree(self.id())
    }

    /// Note attributes, for note nodes only.
    pub fn note(&self) -> Option<&'g NoteAttributes> {
        self.node.note_attributes()
    }

    /// Note title, for note nodes only.
    pub fn title(&self) -> Option<&'g str> {
        self.note().map(|note| note.title.as_str())
    }

    /// Folder path, for note nodes only.
    pub fn folder(&self) -> Option<&'g str> {
        self.note().map(|note| note.folder.as_str())
    }

    /// Tag list, for note nodes only.
    pub fn tags(&self) -> Option<&'g [String]> {
        self.note().map(|note| note.tags.as_slice())
    }
}

impl PartialEq for QueryableNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for QueryableNode<'_> {}

impl Hash for QueryableNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for QueryableNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueryableNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}
