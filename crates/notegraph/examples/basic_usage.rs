//! Basic usage example for notegraph
//!
//! This example demonstrates:
//! - Building a small note graph
//! - Filtering it with a query from the DSL
//! - Pulling a layout snapshot afterwards

use notegraph::{Edge, FilterConfig, GraphFilter, GraphStore, Node, NoteAttributes};

fn main() -> notegraph::Result<()> {
    let mut graph = GraphStore::new();

    println!("Creating a small note graph...\n");

    let notes = [
        ("index.md", "Index", "", vec!["#home"]),
        ("rust.md", "Rust", "lang", vec!["#lang"]),
        ("go.md", "Go", "lang", vec!["#lang"]),
        ("borrowck.md", "Borrow checker", "lang/rust", vec![]),
        ("groceries.md", "Groceries", "personal", vec!["#todo"]),
    ];
    for (id, title, folder, tags) in notes {
        let mut attributes = NoteAttributes::new(title, folder);
        for tag in tags {
            attributes = attributes.with_tag(tag);
        }
        graph.add_node(Node::note(id, attributes))?;
        println!("✓ Added note: {id}");
    }
    graph.add_node(Node::unresolved("python.md"))?;

    for (source, target) in [
        ("index.md", "rust.md"),
        ("index.md", "go.md"),
        ("rust.md", "borrowck.md"),
        ("index.md", "python.md"),
    ] {
        graph.add_edge(Edge::between(source, target))?;
    }
    println!("\n{} nodes, {} edges", graph.node_count(), graph.edge_count());
    println!("degree(index.md) = {}", graph.degree("index.md"));

    let config = FilterConfig {
        query: "WithinDegree(1, WithTitle(\"Rust\"))".to_string(),
        show_orphans: false,
        show_unresolved: false,
    };
    let mut filter = GraphFilter::new();
    filter.update(&config);
    let removed = filter.apply(&mut graph);
    println!("\nFilter removed {removed} nodes");

    println!("\nLayout snapshot:\n{}", notegraph::export::export_json(&graph)?);

    Ok(())
}
