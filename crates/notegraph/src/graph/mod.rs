//! Core graph types and the graph store.
//!
//! This module defines the fundamental building blocks:
//! - [`Node`]: Graph nodes representing notes, tags, attachments and unresolved links
//! - [`Edge`]: Directed links between node ids
//! - [`GraphStore`]: Owner of nodes and edges with cached incidence indices
//! - [`GraphListener`]: Release and structure-changed hooks for renderers and layouts

mod cache;
mod listener;
mod store;
mod types;

pub use listener::GraphListener;
pub use store::GraphStore;
pub use types::{Edge, EdgeId, Node, NodeId, NodeKind, NoteAttributes};
