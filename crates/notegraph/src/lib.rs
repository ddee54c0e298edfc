//! # notegraph
//!
//! In-memory note graph with cached incidence indices and a small query
//! language for filtering it.
//!
//! ## Core Principles
//!
//! - **Explicit Ownership**: Builders own a [`GraphStore`] and pass it by reference
//! - **Integrity Over Convenience**: Duplicate ids are errors, unknown ids are not
//! - **Lazy Indices**: Degrees and incident-edge lists are fixed up on read
//! - **Forgiving Parsing**: Half-typed queries never crash the caller
//!
//! ## Architecture
//!
//! ```text
//! Graph builders (external)
//!     ↓
//! GraphFilter (config → active query → pruning)
//!     ↓
//! Query AST + DSL parser
//!     ↓
//! QueryableNode adapter
//!     ↓
//! GraphStore (nodes, edges, incidence cache, listeners)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use notegraph::{Edge, FilterConfig, GraphFilter, GraphStore, Node, NoteAttributes};
//!
//! # fn example() -> notegraph::Result<()> {
//! let mut graph = GraphStore::new();
//! graph.add_node(Node::note("a.md", NoteAttributes::new("Alpha", "work").with_tag("#todo")))?;
//! graph.add_node(Node::note("b.md", NoteAttributes::new("Beta", "home")))?;
//! graph.add_edge(Edge::between("a.md", "b.md"))?;
//!
//! let mut filter = GraphFilter::new();
//! filter.update(&FilterConfig::with_query("WithFolder(\"work\")"));
//! filter.apply(&mut graph);
//!
//! assert!(graph.has_node("a.md"));
//! assert!(!graph.has_node("b.md"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod filter;
pub mod graph;
pub mod query;

// Re-export main types
pub use error::{GraphError, Result};
pub use filter::{FilterConfig, GraphFilter};
pub use graph::{Edge, EdgeId, GraphListener, GraphStore, Node, NodeId, NodeKind, NoteAttributes};
pub use query::{Argument, Query, QueryParser, QueryRegistry, QuerySet, QueryableNode};
