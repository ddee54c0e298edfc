//! Core graph types: nodes, edges, IDs, and node kinds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a node, unique within a [`GraphStore`](super::GraphStore).
pub type NodeId = String;

/// Identifier of an edge, unique within a [`GraphStore`](super::GraphStore).
pub type EdgeId = String;

/// Attributes carried by note nodes and read by the title/tag/folder predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAttributes {
    /// Note title (usually the file name without extension)
    pub title: String,
    /// Folder path of the note, e.g. `projects/2024`
    pub folder: String,
    /// Tags on the note, including the leading `#`
    pub tags: Vec<String>,
}

impl NoteAttributes {
    /// Create note attributes from a title and folder, with no tags.
    pub fn new(title: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            folder: folder.into(),
            tags: Vec::new(),
        }
    }

    /// Builder pattern: add a tag and return self.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check whether the note carries exactly this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// What a node stands for.
///
/// Only [`NodeKind::Note`] exposes note attributes; predicates let every other
/// kind pass through unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// An existing note in the vault
    Note(NoteAttributes),
    /// A tag, linked to every note that carries it
    Tag,
    /// A non-note file (image, PDF, ...)
    Attachment,
    /// Target of a link that does not resolve to any file
    Unresolved,
}

impl NodeKind {
    /// Short lowercase name, also used as a styling class.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Note(_) => "note",
            NodeKind::Tag => "tag",
            NodeKind::Attachment => "attachment",
            NodeKind::Unresolved => "unresolved",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the note graph.
///
/// Holds layout state (`x`, `y`, velocities and an optional pinned position)
/// which the store never reads; an external layout updates it through
/// [`GraphStore::get_node_mut`](super::GraphStore::get_node_mut).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    /// Text shown next to the node
    pub label: String,
    /// Kind discriminant, carrying note attributes for notes
    pub kind: NodeKind,
    /// Classification classes used by external styling
    pub classes: BTreeSet<String>,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Horizontal velocity
    pub vx: f64,
    /// Vertical velocity
    pub vy: f64,
    /// Pinned horizontal position
    pub fx: Option<f64>,
    /// Pinned vertical position
    pub fy: Option<f64>,
}

impl Node {
    /// Create a node of the given kind, labelled with its id.
    ///
    /// The kind name is added to `classes`.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        let id = id.into();
        let mut classes = BTreeSet::new();
        classes.insert(kind.as_str().to_string());
        Self {
            label: id.clone(),
            id,
            kind,
            classes,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
        }
    }

    /// Create a note node labelled with its title.
    pub fn note(id: impl Into<NodeId>, attributes: NoteAttributes) -> Self {
        let label = attributes.title.clone();
        Self::new(id, NodeKind::Note(attributes)).with_label(label)
    }

    /// Create a tag node.
    pub fn tag(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Tag)
    }

    /// Create an attachment node.
    pub fn attachment(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Attachment)
    }

    /// Create a node for an unresolved link target.
    pub fn unresolved(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Unresolved)
    }

    /// Builder pattern: set the label and return self.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder pattern: add a styling class and return self.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Builder pattern: set the position and return self.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// The node's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Note attributes, if this node is a note.
    pub fn note_attributes(&self) -> Option<&NoteAttributes> {
        match &self.kind {
            NodeKind::Note(attributes) => Some(attributes),
            _ => None,
        }
    }

    /// Check whether the node carries a styling class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Fix the node at a position.
    pub fn pin(&mut self, x: f64, y: f64) {
        self.fx = Some(x);
        self.fy = Some(y);
    }

    /// Release a pinned position.
    pub fn unpin(&mut self) {
        self.fx = None;
        self.fy = None;
    }

    /// Whether the node has a pinned position.
    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() && self.fy.is_some()
    }
}

/// A directed edge between two node ids.
///
/// Either endpoint may name a node that is not in the store (yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,
    /// Source node ID
    pub source_id: NodeId,
    /// Target node ID
    pub target_id: NodeId,
}

impl Edge {
    /// Create a new edge.
    pub fn new(
        id: impl Into<EdgeId>,
        source_id: impl Into<NodeId>,
        target_id: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }

    /// Create an edge whose id is derived from its endpoints (`source->target`).
    pub fn between(source_id: impl Into<NodeId>, target_id: impl Into<NodeId>) -> Self {
        let source_id = source_id.into();
        let target_id = target_id.into();
        Self {
            id: format!("{source_id}->{target_id}"),
            source_id,
            target_id,
        }
    }

    /// Check whether the node is the source or the target of this edge.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }

    /// The endpoint opposite to `node_id`, if `node_id` is an endpoint.
    ///
    /// For a self-loop this is the node itself.
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.source_id == node_id {
            Some(&self.target_id)
        } else if self.target_id == node_id {
            Some(&self.source_id)
        } else {
            None
        }
    }
}
