//! Unit tests for query evaluation
//!
//! These tests verify the title/tag/folder predicates, the within-degree
//! expansion and the set combinators over a small note graph.

use notegraph::{Edge, GraphStore, Node, NoteAttributes, Query, QuerySet, QueryableNode};

fn ids(set: &QuerySet<'_>) -> Vec<String> {
    set.iter().map(|n| n.id().to_string()).collect()
}

fn add_note(graph: &mut GraphStore, id: &str, title: &str, folder: &str, tags: &[&str]) {
    let mut attributes = NoteAttributes::new(title, folder);
    for tag in tags {
        attributes = attributes.with_tag(*tag);
    }
    graph.add_node(Node::note(id, attributes)).unwrap();
}

// Notes plus one tag node and one attachment:
//   seed.md -> x.md -> y.md -> z.md, seed.md -> #a, y.md -> img.png
fn create_test_graph() -> GraphStore {
    let mut graph = GraphStore::new();
    add_note(&mut graph, "seed.md", "Seed note", "projects/alpha", &["#a"]);
    add_note(&mut graph, "x.md", "Next step", "projects/alpha", &[]);
    add_note(&mut graph, "y.md", "Yonder", "projects/beta", &["#b"]);
    add_note(&mut graph, "z.md", "Zenith", "archive", &["#a", "#b"]);
    graph.add_node(Node::tag("#a")).unwrap();
    graph.add_node(Node::attachment("img.png")).unwrap();

    graph.add_edge(Edge::between("seed.md", "x.md")).unwrap();
    graph.add_edge(Edge::between("x.md", "y.md")).unwrap();
    graph.add_edge(Edge::between("y.md", "z.md")).unwrap();
    graph.add_edge(Edge::between("seed.md", "#a")).unwrap();
    graph.add_edge(Edge::between("y.md", "img.png")).unwrap();
    graph
}

#[test]
fn test_title_is_case_sensitive_substring() {
    let graph = create_test_graph();

    let result = graph.query(&Query::with_title("note"));
    assert_eq!(ids(&result), vec!["#a", "img.png", "seed.md"]);

    let result = graph.query(&Query::with_title("Note"));
    assert_eq!(ids(&result), vec!["#a", "img.png"]);
}

#[test]
fn test_empty_pattern_matches_everything() {
    let graph = create_test_graph();
    let all = graph.queryable_nodes();

    assert_eq!(graph.query(&Query::with_title("")), all);
    assert_eq!(graph.query(&Query::with_tag("")), all);
    assert_eq!(graph.query(&Query::with_folder("")), all);
}

#[test]
fn test_tag_match() {
    let graph = create_test_graph();

    let result = graph.query(&Query::with_tag("#b"));
    assert_eq!(ids(&result), vec!["#a", "img.png", "y.md", "z.md"]);
}

#[test]
fn test_folder_match() {
    let graph = create_test_graph();

    let result = graph.query(&Query::with_folder("projects"));
    assert_eq!(ids(&result), vec!["#a", "img.png", "seed.md", "x.md", "y.md"]);
}

#[test]
fn test_non_notes_always_pass_through() {
    let graph = create_test_graph();

    for query in [
        Query::with_title("no such title"),
        Query::with_tag("#nope"),
        Query::with_folder("nowhere"),
    ] {
        assert_eq!(ids(&graph.query(&query)), vec!["#a", "img.png"]);
    }
}

#[test]
fn test_within_degree_zero_is_identity() {
    let graph = create_test_graph();
    let universe = graph.queryable_nodes();

    let query = Query::within_degree(0, Query::with_title("Seed"));
    assert_eq!(query.run(&universe), universe);

    let query = Query::within_degree(-3, Query::with_title("Seed"));
    assert_eq!(query.run(&universe), universe);

    let query = Query::WithinDegree {
        degree: 2,
        query: None,
    };
    assert_eq!(query.run(&universe), universe);
}

#[test]
fn test_within_degree_counts_hops() {
    let mut graph = GraphStore::new();
    add_note(&mut graph, "seed", "Seed", "", &[]);
    add_note(&mut graph, "x", "X", "", &[]);
    add_note(&mut graph, "y", "Y", "", &[]);
    graph.add_edge(Edge::between("seed", "x")).unwrap();
    graph.add_edge(Edge::between("x", "y")).unwrap();

    let one = graph.query(&Query::within_degree(1, Query::with_title("Seed")));
    assert_eq!(ids(&one), vec!["x"]);

    let two = graph.query(&Query::within_degree(2, Query::with_title("Seed")));
    assert_eq!(ids(&two), vec!["x", "y"]);

    let many = graph.query(&Query::within_degree(50, Query::with_title("Seed")));
    assert_eq!(ids(&many), vec!["x", "y"]);
}

#[test]
fn test_within_degree_follows_edges_both_ways() {
    let mut graph = GraphStore::new();
    add_note(&mut graph, "a", "Source", "", &[]);
    add_note(&mut graph, "b", "Sink", "", &[]);
    graph.add_edge(Edge::between("a", "b")).unwrap();

    // b only has an incoming edge
    let result = graph.query(&Query::within_degree(1, Query::with_title("Sink")));
    assert_eq!(ids(&result), vec!["a"]);
}

#[test]
fn test_within_degree_handles_cycles() {
    let mut graph = GraphStore::new();
    for id in ["a", "b", "c"] {
        add_note(&mut graph, id, id, "", &[]);
    }
    graph.add_edge(Edge::between("a", "b")).unwrap();
    graph.add_edge(Edge::between("b", "c")).unwrap();
    graph.add_edge(Edge::between("c", "a")).unwrap();

    let result = graph.query(&Query::within_degree(10, Query::with_title("a")));
    assert_eq!(ids(&result), vec!["b", "c"]);
}

#[test]
fn test_within_degree_stays_inside_universe() {
    let mut graph = GraphStore::new();
    add_note(&mut graph, "seed", "Seed", "", &[]);
    add_note(&mut graph, "x", "X", "", &[]);
    add_note(&mut graph, "y", "Y", "", &[]);
    graph.add_edge(Edge::between("seed", "x")).unwrap();
    graph.add_edge(Edge::between("x", "y")).unwrap();

    let universe: QuerySet<'_> = graph
        .queryable_nodes()
        .into_iter()
        .filter(|n| n.id() != "x")
        .collect();

    // x is the only bridge from seed to y
    let result = Query::within_degree(3, Query::with_title("Seed")).run(&universe);
    assert!(result.is_empty());
}

#[test]
fn test_nested_within_degree() {
    let graph = create_test_graph();

    // the seeds are z.md plus the pass-through #a and img.png
    let query = Query::within_degree(1, Query::with_folder("archive"));
    let result = graph.query(&query);
    assert_eq!(ids(&result), vec!["seed.md", "y.md"]);
}

#[test]
fn test_and_or_not() {
    let graph = create_test_graph();

    let both = Query::And(vec![Query::with_tag("#a"), Query::with_tag("#b")]);
    assert_eq!(ids(&graph.query(&both)), vec!["#a", "img.png", "z.md"]);

    let either = Query::Or(vec![Query::with_title("Seed"), Query::with_title("Yonder")]);
    assert_eq!(
        ids(&graph.query(&either)),
        vec!["#a", "img.png", "seed.md", "y.md"]
    );

    let notes_only = Query::negate(Query::with_title("\u{0}"));
    assert_eq!(ids(&graph.query(&notes_only)), vec!["seed.md", "x.md", "y.md", "z.md"]);

    assert_eq!(graph.query(&Query::And(vec![])), graph.queryable_nodes());
    assert!(graph.query(&Query::Or(vec![])).is_empty());
}

#[test]
fn test_query_equality() {
    let query = Query::within_degree(2, Query::with_tag("#a"));

    assert_eq!(query, query.clone());
    assert_eq!(query, Query::within_degree(2, Query::with_tag("#a")));
    assert_ne!(query, Query::within_degree(1, Query::with_tag("#a")));
    assert_ne!(Query::with_tag("#a"), Query::with_title("#a"));
    assert_ne!(
        Query::And(vec![Query::with_tag("#a")]),
        Query::Or(vec![Query::with_tag("#a")])
    );
}

#[test]
fn test_results_are_subsets_of_universe() {
    let graph = create_test_graph();
    let universe = graph.queryable_nodes();
    let queries = [
        Query::with_title("e"),
        Query::within_degree(2, Query::with_tag("#a")),
        Query::negate(Query::with_folder("projects")),
    ];

    for query in &queries {
        let result = query.run(&universe);
        assert!(result.is_subset(&universe), "{query}");
    }
}

#[test]
fn test_queryable_from_id() {
    let graph = create_test_graph();

    assert!(QueryableNode::from_id(&graph, "missing").is_none());
    let seed = QueryableNode::from_id(&graph, "seed.md").unwrap();
    assert_eq!(seed.folder(), Some("projects/alpha"));
    assert_eq!(ids(&seed.nodes_it_connects_to()), vec!["#a", "x.md"]);
}
