//! Derived incidence indices: per-node incident-edge lists and degrees.
//!
//! Both live behind `RefCell` so read paths on `&GraphStore` can prune and
//! memoize. Edge removal never walks the lists; stale entries are dropped the
//! next time a list is read. Degrees are memoized on read and invalidated at
//! every edge mutation that touches the node.

use super::types::{Edge, EdgeId, NodeId};
use log::trace;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub(crate) struct IncidenceCache {
    incident: RefCell<HashMap<NodeId, Vec<EdgeId>>>,
    degrees: RefCell<HashMap<NodeId, usize>>,
}

impl IncidenceCache {
    /// Append a new edge to both endpoint lists (once for a self-loop).
    pub(crate) fn record_edge(&mut self, edge: &Edge) {
        let incident = self.incident.get_mut();
        incident
            .entry(edge.source_id.clone())
            .or_default()
            .push(edge.id.clone());
        if edge.target_id != edge.source_id {
            incident
                .entry(edge.target_id.clone())
                .or_default()
                .push(edge.id.clone());
        }
        self.invalidate(&edge.source_id);
        self.invalidate(&edge.target_id);
    }

    /// Drop the memoized degree of a node.
    pub(crate) fn invalidate(&mut self, node_id: &str) {
        self.degrees.get_mut().remove(node_id);
    }

    /// Drop everything known about a node. Only valid once no edge touches it.
    pub(crate) fn forget_node(&mut self, node_id: &str) {
        self.incident.get_mut().remove(node_id);
        self.degrees.get_mut().remove(node_id);
    }

    pub(crate) fn clear(&mut self) {
        self.incident.get_mut().clear();
        self.degrees.get_mut().clear();
    }

    /// Ids of live edges touching `node_id`, in insertion order.
    ///
    /// Entries whose edge is gone, or whose id now names an edge with other
    /// endpoints, are pruned in place. Duplicates left by removing and
    /// re-adding the same edge id are collapsed.
    pub(crate) fn connected_edges(
        &self,
        node_id: &str,
        edges: &HashMap<EdgeId, Edge>,
    ) -> Vec<EdgeId> {
        let mut incident = self.incident.borrow_mut();
        let Some(list) = incident.get_mut(node_id) else {
            return Vec::new();
        };

        let before = list.len();
        let mut seen = HashSet::new();
        list.retain(|edge_id| {
            edges
                .get(edge_id)
                .is_some_and(|edge| edge.touches(node_id))
                && seen.insert(edge_id.clone())
        });
        if list.len() != before {
            trace!(
                "Pruned {} stale incident entries for node {node_id}",
                before - list.len()
            );
        }
        if list.is_empty() {
            incident.remove(node_id);
            return Vec::new();
        }

        list.clone()
    }

    /// Number of live edges touching `node_id`, memoized until invalidated.
    pub(crate) fn degree(&self, node_id: &str, edges: &HashMap<EdgeId, Edge>) -> usize {
        let cached = self.degrees.borrow().get(node_id).copied();
        if let Some(degree) = cached {
            return degree;
        }

        let degree = self.connected_edges(node_id, edges).len();
        trace!("Recomputed degree of node {node_id}: {degree}");
        self.degrees
            .borrow_mut()
            .insert(node_id.to_string(), degree);
        degree
    }

    #[cfg(test)]
    fn raw_len(&self, node_id: &str) -> usize {
        self.incident.borrow().get(node_id).map_or(0, Vec::len)
    }

    #[cfg(test)]
    fn incident_len(&self) -> usize {
        self.incident.borrow().len()
    }

    #[cfg(test)]
    fn is_degree_cached(&self, node_id: &str) -> bool {
        self.degrees.borrow().contains_key(node_id)
    }
}
