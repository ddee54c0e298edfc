//! Graph queries: the AST, the node adapter it evaluates against, and the DSL parser.
//!
//! ```
//! use notegraph::{Edge, GraphStore, Node, NoteAttributes, QueryParser};
//!
//! # fn example() -> notegraph::Result<()> {
//! let mut graph = GraphStore::new();
//! graph.add_node(Node::note("a.md", NoteAttributes::new("Alpha", "").with_tag("#a")))?;
//! graph.add_node(Node::note("b.md", NoteAttributes::new("Beta", "")))?;
//! graph.add_edge(Edge::between("a.md", "b.md"))?;
//!
//! let query = QueryParser::new().parse("WithinDegree(1, WithTag(\"#a\"))").unwrap();
//! let ids: Vec<_> = graph.query(&query).iter().map(|n| n.id()).collect();
//! assert_eq!(ids, vec!["b.md"]);
//! # Ok(())
//! # }
//! ```

mod ast;
mod parser;
mod queryable;

pub use ast::Query;
pub use parser::{
    normalize_name, parse, Argument, Cursor, QueryConstructor, QueryParser, QueryRegistry,
    MAX_NESTING,
};
pub use queryable::QueryableNode;

use crate::graph::GraphStore;
use std::collections::BTreeSet;

/// A set of queryable nodes, ordered by node id.
pub type QuerySet<'g> = BTreeSet<QueryableNode<'g>>;

/// One adapter per node in `graph`.
pub fn universe(graph: &GraphStore) -> QuerySet<'_> {
    graph
        .get_nodes()
        .into_iter()
        .map(|node| QueryableNode::new(graph, node))
        .collect()
}
