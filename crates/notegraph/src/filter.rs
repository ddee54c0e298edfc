//! Applying filter configuration to a graph store.
//!
//! [`GraphFilter`] is what a graph builder holds between rebuilds. It turns
//! the user's [`FilterConfig`] into an active [`Query`] and prunes a freshly
//! built [`GraphStore`] accordingly.

use crate::error::{GraphError, Result};
use crate::graph::{GraphStore, NodeId, NodeKind};
use crate::query::{Query, QueryParser};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// User-facing filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Query DSL text; blank means no query filter
    pub query: String,
    /// Keep nodes left without neighbors after filtering
    pub show_orphans: bool,
    /// Keep nodes for links that resolve to no file
    pub show_unresolved: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            show_orphans: true,
            show_unresolved: true,
        }
    }
}

impl FilterConfig {
    /// Create a config with only a query set.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Decode a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GraphError::serialization("Failed to parse filter config", Some(e)))
    }

    /// Encode the config as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| GraphError::serialization("Failed to serialize filter config", Some(e)))
    }
}

/// The active filter of a graph builder.
#[derive(Debug, Clone)]
pub struct GraphFilter {
    parser: QueryParser,
    query: Option<Query>,
    show_orphans: bool,
    show_unresolved: bool,
}

impl Default for GraphFilter {
    fn default() -> Self {
        Self::with_parser(QueryParser::new())
    }
}

impl GraphFilter {
    /// A filter that keeps everything, using the built-in query functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter that keeps everything, parsing with `parser`.
    pub fn with_parser(parser: QueryParser) -> Self {
        Self {
            parser,
            query: None,
            show_orphans: true,
            show_unresolved: true,
        }
    }

    /// The active query, if any.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Adopt a new configuration. Returns whether anything effective changed.
    ///
    /// Blank query text clears the query. Text that does not parse leaves the
    /// previous query active. A reparsed query equal to the active one counts
    /// as unchanged, so callers can skip rebuilding.
    pub fn update(&mut self, config: &FilterConfig) -> bool {
        let query = if config.query.trim().is_empty() {
            None
        } else {
            match self.parser.parse(&config.query) {
                Some(query) => Some(query),
                None => {
                    warn!(
                        "Ignoring unparseable filter query '{}', keeping previous filter",
                        config.query
                    );
                    self.query.clone()
                }
            }
        };

        let changed = query != self.query
            || config.show_orphans != self.show_orphans
            || config.show_unresolved != self.show_unresolved;

        if changed {
            match &query {
                Some(query) => info!("Filter changed: {query}"),
                None => info!("Filter changed: no query"),
            }
        } else {
            debug!("Filter unchanged");
        }

        self.query = query;
        self.show_orphans = config.show_orphans;
        self.show_unresolved = config.show_unresolved;
        changed
    }

    /// Remove every node the filter rejects, then notify listeners.
    ///
    /// The query runs over all nodes of the store. After that, unresolved
    /// nodes and then orphans (degree 0) are removed if the config hides them.
    /// Edges to missing nodes and self-loops both count toward the degree.
    /// Returns the number of nodes removed.
    pub fn apply(&self, graph: &mut GraphStore) -> usize {
        let mut removed = 0;

        if let Some(query) = &self.query {
            let keep: HashSet<NodeId> = graph
                .query(query)
                .iter()
                .map(|node| node.id().to_string())
                .collect();
            graph.for_each_node(|graph, id| {
                if !keep.contains(id) {
                    graph.remove_node(id);
                    removed += 1;
                }
            });
        }

        if !self.show_unresolved {
            graph.for_each_node(|graph, id| {
                let unresolved = graph
                    .get_node(id)
                    .is_some_and(|node| node.kind == NodeKind::Unresolved);
                if unresolved {
                    graph.remove_node(id);
                    removed += 1;
                }
            });
        }

        if !self.show_orphans {
            graph.for_each_node(|graph, id| {
                if graph.degree(id) == 0 {
                    graph.remove_node(id);
                    removed += 1;
                }
            });
        }

        debug!("Filter removed {removed} nodes");
        graph.notify_structure_changed();
        removed
    }
}
