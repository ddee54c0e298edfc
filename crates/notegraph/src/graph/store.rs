//! The graph store: owner of nodes and edges and their derived indices.

use super::cache::IncidenceCache;
use super::listener::GraphListener;
use super::types::{Edge, EdgeId, Node, NodeId};
use crate::error::{GraphError, Result};
use crate::query::{Query, QuerySet};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// In-memory note graph.
///
/// Node and edge ids are unique per store; inserting a duplicate is an error.
/// Edges may reference node ids that are not (yet) in the store: such edges are
/// indexed under those ids and become visible from the node once it is added.
///
/// Lookups of unknown ids never fail. They return `None`, an empty list, or 0.
///
/// ```
/// use notegraph::{Edge, GraphStore, Node, NoteAttributes};
///
/// # fn example() -> notegraph::Result<()> {
/// let mut graph = GraphStore::new();
/// graph.add_node(Node::note("a.md", NoteAttributes::new("A", "")))?;
/// graph.add_node(Node::note("b.md", NoteAttributes::new("B", "")))?;
/// graph.add_edge(Edge::between("a.md", "b.md"))?;
///
/// assert_eq!(graph.degree("a.md"), 1);
/// graph.remove_node("b.md");
/// assert_eq!(graph.degree("a.md"), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
    cache: IncidenceCache,
    listeners: Vec<Box<dyn GraphListener>>,
}

impl GraphStore {
    /// Create an empty graph store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode {
                node_id: node.id().to_string(),
            });
        }
        debug!("Adding node: id={}, kind={}", node.id(), node.kind);
        self.nodes.insert(node.id().to_string(), node);
        Ok(())
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Incident edges are removed first, so no edge is left pointing at the
    /// removed node. Absent ids are a no-op and return `None`.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        if !self.nodes.contains_key(id) {
            trace!("remove_node: {id} not present");
            return None;
        }
        debug!("Removing node: id={id}");

        let incident = self.cache.connected_edges(id, &self.edges);
        trace!("Removing {} incident edges of node {id}", incident.len());
        for edge_id in incident {
            self.remove_edge(&edge_id);
        }

        self.cache.forget_node(id);
        let node = self.nodes.remove(id)?;
        for listener in &mut self.listeners {
            listener.on_node_released(&node);
        }
        Some(node)
    }

    /// Check whether a node exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get a node by id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable reference to a node, e.g. to update its position.
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// All nodes, in no particular order.
    pub fn get_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    /// Add an edge and index it under both endpoint ids.
    ///
    /// The endpoints do not have to exist.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEdge`] if an edge with the same id exists.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge { edge_id: edge.id });
        }
        debug!(
            "Adding edge: id={}, source={}, target={}",
            edge.id, edge.source_id, edge.target_id
        );
        self.cache.record_edge(&edge);
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Remove an edge. Absent ids are a no-op and return `None`.
    ///
    /// Endpoint incident lists are pruned lazily on their next read.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let edge = self.edges.remove(id)?;
        debug!("Removing edge: id={id}");
        self.cache.invalidate(&edge.source_id);
        self.cache.invalidate(&edge.target_id);
        for listener in &mut self.listeners {
            listener.on_edge_released(&edge);
        }
        Some(edge)
    }

    /// Check whether an edge exists.
    pub fn has_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// Get an edge by id.
    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges, in no particular order.
    pub fn get_edges(&self) -> Vec<&Edge> {
        self.edges.values().collect()
    }

    /// Ids of all edges with `node_id` as source or target.
    ///
    /// Works for ids that have no node in the store.
    pub fn get_connected_edges(&self, node_id: &str) -> Vec<EdgeId> {
        self.cache.connected_edges(node_id, &self.edges)
    }

    /// Number of edges with `node_id` as source or target.
    pub fn degree(&self, node_id: &str) -> usize {
        self.cache.degree(node_id, &self.edges)
    }

    /// Ids of existing nodes joined to `node_id` by an edge in either direction.
    pub fn neighbors(&self, node_id: &str) -> Vec<NodeId> {
        let edge_ids = self.get_connected_edges(node_id);
        let mut seen = HashSet::new();
        let neighbors = edge_ids
            .iter()
            .filter_map(|edge_id| self.edges.get(edge_id))
            .filter_map(|edge| edge.other_end(node_id))
            .filter(|other| self.nodes.contains_key(*other))
            .filter(|other| seen.insert(*other))
            .map(str::to_string)
            .collect();
        neighbors
    }

    /// Call `f` once for every node present when the iteration starts.
    ///
    /// `f` receives the store mutably and may remove the current node (or
    /// any other). Iteration runs over a snapshot of ids; nodes removed before
    /// their turn are skipped, nodes added during iteration are not visited.
    pub fn for_each_node<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self, &str),
    {
        let ids: Vec<NodeId> = self.nodes.keys().cloned().collect();
        for id in ids {
            if self.nodes.contains_key(&id) {
                f(self, &id);
            }
        }
    }

    /// Call `f` once for every edge present when the iteration starts.
    ///
    /// Same removal guarantees as [`for_each_node`](Self::for_each_node).
    pub fn for_each_edge<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self, &str),
    {
        let ids: Vec<EdgeId> = self.edges.keys().cloned().collect();
        for id in ids {
            if self.edges.contains_key(&id) {
                f(self, &id);
            }
        }
    }

    /// Get the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store holds neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Remove all nodes and edges, releasing each through the listeners.
    pub fn clear(&mut self) {
        debug!(
            "Clearing graph: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
        for (_, edge) in self.edges.drain() {
            for listener in &mut self.listeners {
                listener.on_edge_released(&edge);
            }
        }
        for (_, node) in self.nodes.drain() {
            for listener in &mut self.listeners {
                listener.on_node_released(&node);
            }
        }
        self.cache.clear();
    }

    /// Register a listener.
    pub fn add_listener(&mut self, listener: Box<dyn GraphListener>) {
        self.listeners.push(listener);
    }

    /// Tell every listener that a batch of mutations is complete.
    pub fn notify_structure_changed(&mut self) {
        debug!(
            "Structure changed: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener.on_structure_changed(self);
        }
        // Listeners registered from inside a callback land in self.listeners.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    /// The query universe: one adapter per node in the store.
    pub fn queryable_nodes(&self) -> QuerySet<'_> {
        crate::query::universe(self)
    }

    /// Run a query over every node in the store.
    pub fn query(&self, query: &Query) -> QuerySet<'_> {
        query.run(&self.queryable_nodes())
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
