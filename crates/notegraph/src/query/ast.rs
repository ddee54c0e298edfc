//! Query AST and its evaluation over a set of queryable nodes.

use super::queryable::QueryableNode;
use super::QuerySet;
use crate::graph::NoteAttributes;
use log::trace;
use std::collections::HashSet;
use std::fmt;

/// A graph filter expression.
///
/// Queries are plain immutable values. `==` is structural: two queries are
/// equal when they are the same kind with equal parameters, recursively. Callers
/// use this to skip re-filtering when the configured query did not change.
///
/// `Display` renders the query in the DSL accepted by
/// [`QueryParser`](super::QueryParser).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Notes whose title contains the substring (case-sensitive)
    WithTitle(String),
    /// Notes carrying the tag
    WithTag(String),
    /// Notes whose folder path contains the substring
    WithFolder(String),
    /// Nodes within `degree` hops of the nodes matched by `query`, excluding
    /// those matched nodes themselves
    WithinDegree {
        /// Hop budget; below 1 disables the expansion
        degree: i64,
        /// Seed query; `None` disables the expansion
        query: Option<Box<Query>>,
    },
    /// Intersection of the sub-results
    And(Vec<Query>),
    /// Union of the sub-results
    Or(Vec<Query>),
    /// Everything the sub-query does not match
    Not(Box<Query>),
}

impl Query {
    /// Title containment query.
    pub fn with_title(pattern: impl Into<String>) -> Self {
        Query::WithTitle(pattern.into())
    }

    /// Tag membership query.
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Query::WithTag(tag.into())
    }

    /// Folder containment query.
    pub fn with_folder(pattern: impl Into<String>) -> Self {
        Query::WithFolder(pattern.into())
    }

    /// Neighborhood expansion around the nodes matched by `query`.
    pub fn within_degree(degree: i64, query: Query) -> Self {
        Query::WithinDegree {
            degree,
            query: Some(Box::new(query)),
        }
    }

    /// Negation of `query`.
    pub fn negate(query: Query) -> Self {
        Query::Not(Box::new(query))
    }

    /// DSL function name of this query kind.
    pub fn name(&self) -> &'static str {
        match self {
            Query::WithTitle(_) => "WithTitle",
            Query::WithTag(_) => "WithTag",
            Query::WithFolder(_) => "WithFolder",
            Query::WithinDegree { .. } => "WithinDegree",
            Query::And(_) => "And",
            Query::Or(_) => "Or",
            Query::Not(_) => "Not",
        }
    }

    /// Evaluate the query over `universe`.
    ///
    /// The result is always a subset of `universe`. Title, tag and folder
    /// predicates only filter note nodes; every other node passes through.
    pub fn run<'g>(&self, universe: &QuerySet<'g>) -> QuerySet<'g> {
        match self {
            Query::WithTitle(pattern) => {
                retain_notes(universe, |note| note.title.contains(pattern.as_str()))
            }
            Query::WithTag(tag) => {
                retain_notes(universe, |note| tag.is_empty() || note.has_tag(tag))
            }
            Query::WithFolder(pattern) => {
                retain_notes(universe, |note| note.folder.contains(pattern.as_str()))
            }
            Query::WithinDegree { degree, query } => match query {
                Some(seed) if *degree >= 1 => expand(*degree, seed, universe),
                _ => universe.clone(),
            },
            Query::And(queries) => {
                let mut result = universe.clone();
                for query in queries {
                    let matched = query.run(universe);
                    result.retain(|node| matched.contains(node));
                }
                result
            }
            Query::Or(queries) => {
                let mut result = QuerySet::new();
                for query in queries {
                    result.extend(query.run(universe));
                }
                result
            }
            Query::Not(query) => {
                let matched = query.run(universe);
                universe
                    .iter()
                    .filter(|node| !matched.contains(*node))
                    .copied()
                    .collect()
            }
        }
    }
}

fn retain_notes<'g, F>(universe: &QuerySet<'g>, keep: F) -> QuerySet<'g>
where
    F: Fn(&NoteAttributes) -> bool,
{
    universe
        .iter()
        .filter(|node| node.note().map_or(true, &keep))
        .copied()
        .collect()
}

/// Breadth-first expansion from the seed set, one frontier per hop.
fn expand<'g>(degree: i64, seed: &Query, universe: &QuerySet<'g>) -> QuerySet<'g> {
    let seeds = seed.run(universe);
    let mut visited: HashSet<&'g str> = seeds.iter().map(QueryableNode::id).collect();
    let mut frontier = seeds;
    let mut result = QuerySet::new();

    for hop in 1..=degree {
        let mut next = QuerySet::new();
        for node in &frontier {
            for neighbor in node.connected_nodes() {
                if universe.contains(&neighbor) && visited.insert(neighbor.id()) {
                    next.insert(neighbor);
                }
            }
        }
        trace!("WithinDegree hop {hop}: {} new nodes", next.len());
        if next.is_empty() {
            break;
        }
        result.extend(next.iter().copied());
        frontier = next;
    }

    result
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        match self {
            Query::WithTitle(s) | Query::WithTag(s) | Query::WithFolder(s) => {
                write!(f, "\"{s}\"")?;
            }
            Query::WithinDegree { degree, query } => {
                write!(f, "{degree}")?;
                if let Some(query) = query {
                    write!(f, ", {query}")?;
                }
            }
            Query::And(queries) | Query::Or(queries) => {
                for (i, query) in queries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{query}")?;
                }
            }
            Query::Not(query) => write!(f, "{query}")?,
        }
        f.write_str(")")
    }
}
