//! Unit tests for GraphStore: identity, cascading removal, incidence caches
//! and removal during iteration.

use notegraph::{Edge, GraphError, GraphStore, Node, NoteAttributes};
use proptest::prelude::*;
use std::collections::HashSet;

fn note(id: &str) -> Node {
    Node::note(id, NoteAttributes::new(id, ""))
}

// Nodes A, B, C with edges A-B and B-C
fn create_chain() -> GraphStore {
    let mut graph = GraphStore::new();
    for id in ["A", "B", "C"] {
        graph.add_node(note(id)).unwrap();
    }
    graph.add_edge(Edge::new("ab", "A", "B")).unwrap();
    graph.add_edge(Edge::new("bc", "B", "C")).unwrap();
    graph
}

#[test]
fn test_add_and_get_node() {
    let mut graph = GraphStore::new();
    graph.add_node(note("a.md")).unwrap();

    assert!(graph.has_node("a.md"));
    assert_eq!(graph.get_node("a.md").map(|n| n.label.as_str()), Some("a.md"));
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.get_nodes().len(), 1);
}

#[test]
fn test_duplicate_node_is_an_error() {
    let mut graph = GraphStore::new();
    graph.add_node(note("a.md")).unwrap();

    let err = graph.add_node(Node::tag("a.md")).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateNode { ref node_id } if node_id == "a.md"));
    // the original node is untouched
    assert!(graph.get_node("a.md").unwrap().note_attributes().is_some());
}

#[test]
fn test_duplicate_edge_is_an_error() {
    let mut graph = GraphStore::new();
    graph.add_edge(Edge::new("e", "a", "b")).unwrap();

    let err = graph.add_edge(Edge::new("e", "c", "d")).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateEdge { .. }));
    assert_eq!(graph.get_edge("e").unwrap().source_id, "a");
    assert_eq!(graph.degree("c"), 0);
}

#[test]
fn test_unknown_ids_are_not_errors() {
    let mut graph = GraphStore::new();

    assert!(graph.get_node("nope").is_none());
    assert!(graph.get_edge("nope").is_none());
    assert!(graph.get_connected_edges("nope").is_empty());
    assert_eq!(graph.degree("nope"), 0);
    assert!(graph.neighbors("nope").is_empty());
    assert!(graph.remove_node("nope").is_none());
    assert!(graph.remove_edge("nope").is_none());
}

#[test]
fn test_remove_middle_node_cascades() {
    let mut graph = create_chain();

    let removed = graph.remove_node("B");

    assert_eq!(removed.map(|n| n.id().to_string()), Some("B".to_string()));
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.has_edge("ab"));
    assert!(!graph.has_edge("bc"));
    assert_eq!(graph.degree("A"), 0);
    assert_eq!(graph.degree("C"), 0);
    assert!(graph.get_connected_edges("A").is_empty());
    assert!(graph.get_connected_edges("C").is_empty());
}

#[test]
fn test_remove_node_leaves_unrelated_edges() {
    let mut graph = create_chain();
    graph.add_node(note("D")).unwrap();
    graph.add_edge(Edge::new("cd", "C", "D")).unwrap();

    graph.remove_node("A");

    assert!(!graph.has_edge("ab"));
    assert!(graph.has_edge("bc"));
    assert!(graph.has_edge("cd"));
    assert_eq!(graph.degree("C"), 2);
}

#[test]
fn test_dangling_edge_resolves_when_node_appears() {
    let mut graph = GraphStore::new();
    graph.add_node(note("a.md")).unwrap();
    graph.add_edge(Edge::new("e", "a.md", "later.md")).unwrap();

    assert_eq!(graph.degree("later.md"), 1);
    assert!(graph.neighbors("a.md").is_empty());

    graph.add_node(note("later.md")).unwrap();

    assert_eq!(graph.get_connected_edges("later.md"), vec!["e".to_string()]);
    assert_eq!(graph.neighbors("a.md"), vec!["later.md".to_string()]);
}

#[test]
fn test_connected_edges_see_edges_added_after_node() {
    let mut graph = GraphStore::new();
    graph.add_node(note("a")).unwrap();
    assert!(graph.get_connected_edges("a").is_empty());

    graph.add_edge(Edge::new("in", "x", "a")).unwrap();
    graph.add_edge(Edge::new("out", "a", "y")).unwrap();

    let edges: HashSet<_> = graph.get_connected_edges("a").into_iter().collect();
    assert_eq!(edges, HashSet::from(["in".to_string(), "out".to_string()]));
}

#[test]
fn test_degree_tracks_mutations() {
    let mut graph = GraphStore::new();
    assert_eq!(graph.degree("a"), 0);

    graph.add_edge(Edge::new("1", "a", "b")).unwrap();
    assert_eq!(graph.degree("a"), 1);
    graph.add_edge(Edge::new("2", "c", "a")).unwrap();
    assert_eq!(graph.degree("a"), 2);
    graph.add_edge(Edge::new("3", "a", "a")).unwrap();
    assert_eq!(graph.degree("a"), 3);

    graph.remove_edge("2");
    assert_eq!(graph.degree("a"), 2);
    assert_eq!(graph.degree("c"), 0);

    // re-adding a removed id must not count twice
    graph.add_edge(Edge::new("1", "a", "b")).unwrap_err();
    graph.remove_edge("1");
    graph.add_edge(Edge::new("1", "a", "b")).unwrap();
    assert_eq!(graph.degree("a"), 2);
    assert_eq!(graph.get_connected_edges("a").len(), 2);
}

const NODE_POOL: usize = 12;

#[derive(Debug, Clone)]
enum Operation {
    AddNode(usize),
    RemoveNode(usize),
    AddEdge { source: usize, target: usize },
    /// Index into the live edges, taken modulo their count
    RemoveEdge(usize),
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    let node = 0..NODE_POOL;
    prop_oneof![
        node.clone().prop_map(Operation::AddNode),
        node.clone().prop_map(Operation::RemoveNode),
        (node.clone(), node).prop_map(|(source, target)| Operation::AddEdge { source, target }),
        any::<usize>().prop_map(Operation::RemoveEdge),
    ]
}

fn operations_strategy(max: usize) -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(operation_strategy(), 0..max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Degrees, incident lists and edge membership match a plain edge list
    #[test]
    fn test_random_mutations_match_reference(operations in operations_strategy(120)) {
        let mut graph = GraphStore::new();
        let mut nodes: HashSet<String> = HashSet::new();
        let mut edges: Vec<(String, String, String)> = Vec::new();

        for (step, operation) in operations.into_iter().enumerate() {
            match operation {
                Operation::AddNode(n) => {
                    let id = format!("n{n}");
                    if nodes.insert(id.clone()) {
                        prop_assert!(graph.add_node(note(&id)).is_ok());
                    } else {
                        prop_assert!(graph.add_node(note(&id)).is_err());
                    }
                }
                Operation::RemoveNode(n) => {
                    let id = format!("n{n}");
                    if nodes.remove(&id) {
                        prop_assert!(graph.remove_node(&id).is_some());
                        edges.retain(|(_, s, t)| *s != id && *t != id);
                    } else {
                        prop_assert!(graph.remove_node(&id).is_none());
                    }
                }
                Operation::AddEdge { source, target } => {
                    let id = format!("e{step}");
                    let (source, target) = (format!("n{source}"), format!("n{target}"));
                    prop_assert!(graph
                        .add_edge(Edge::new(id.clone(), source.clone(), target.clone()))
                        .is_ok());
                    edges.push((id, source, target));
                }
                Operation::RemoveEdge(index) => {
                    if !edges.is_empty() {
                        let (id, _, _) = edges.remove(index % edges.len());
                        prop_assert!(graph.remove_edge(&id).is_some());
                    }
                }
            }

            for i in 0..NODE_POOL {
                let id = format!("n{i}");
                prop_assert_eq!(graph.has_node(&id), nodes.contains(&id));
                let expected = edges.iter().filter(|(_, s, t)| *s == id || *t == id).count();
                prop_assert_eq!(graph.degree(&id), expected, "degree of {} at step {}", id, step);
                prop_assert_eq!(graph.get_connected_edges(&id).len(), expected);
            }
            prop_assert_eq!(graph.edge_count(), edges.len());
            for (id, _, _) in &edges {
                prop_assert!(graph.has_edge(id));
            }
        }
    }
}

#[test]
fn test_for_each_node_removing_every_node() {
    let mut graph = create_chain();
    graph.add_node(note("D")).unwrap();
    let mut visited = Vec::new();

    graph.for_each_node(|graph, id| {
        visited.push(id.to_string());
        graph.remove_node(id);
    });

    visited.sort();
    assert_eq!(visited, vec!["A", "B", "C", "D"]);
    assert!(graph.is_empty());
}

#[test]
fn test_for_each_node_skips_nodes_removed_earlier() {
    let mut graph = create_chain();
    let mut visited = 0;

    graph.for_each_node(|graph, _| {
        visited += 1;
        // removes every remaining node on the first call
        for id in ["A", "B", "C"] {
            graph.remove_node(id);
        }
    });

    assert_eq!(visited, 1);
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_for_each_edge_with_removal() {
    let mut graph = create_chain();
    let mut visited = Vec::new();

    graph.for_each_edge(|graph, id| {
        visited.push(id.to_string());
        if id == "ab" {
            graph.remove_edge(id);
        }
    });

    visited.sort();
    assert_eq!(visited, vec!["ab", "bc"]);
    assert!(!graph.has_edge("ab"));
    assert!(graph.has_edge("bc"));
    assert_eq!(graph.degree("A"), 0);
    assert_eq!(graph.degree("B"), 1);
}

#[test]
fn test_get_node_mut_updates_position() {
    let mut graph = create_chain();

    if let Some(node) = graph.get_node_mut("A") {
        node.x = 10.0;
        node.pin(1.0, 2.0);
    }

    let node = graph.get_node("A").unwrap();
    assert_eq!(node.x, 10.0);
    assert!(node.is_pinned());
}

#[test]
fn test_clear() {
    let mut graph = create_chain();

    graph.clear();

    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.get_connected_edges("B").is_empty());
    assert_eq!(graph.degree("B"), 0);
    // the store is reusable after clearing
    graph.add_node(note("A")).unwrap();
    graph.add_edge(Edge::new("ab", "A", "B")).unwrap();
    assert_eq!(graph.degree("A"), 1);
}
