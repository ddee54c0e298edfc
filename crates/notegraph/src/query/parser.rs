//! Recursive-descent parser for the query DSL.
//!
//! The DSL is a single function call with nested calls as arguments:
//!
//! ```text
//! WithinDegree(2, And(WithTag("#project"), Not(WithFolder("archive"))))
//! ```
//!
//! Arguments are double-quoted strings (no escapes), signed integers, or
//! nested calls, separated by commas and/or whitespace. Function names are
//! matched after dropping non-letters and lower-casing, so `withTag`,
//! `with_tag` and `WithTag` are the same function.
//!
//! Parsing never fails loudly. Unknown names and malformed literals give
//! `None`; a missing closing quote or paren ends the construct at end of
//! input and keeps whatever was parsed, which is what an editor wants while
//! the user is still typing. Calls nested deeper than [`MAX_NESTING`] give
//! `None` as well.

use super::ast::Query;
use log::trace;
use std::collections::HashMap;

/// Deepest call nesting the parser follows. Deeper input parses to `None`.
pub const MAX_NESTING: usize = 256;

/// A parsed argument of a DSL call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Double-quoted string literal
    Str(String),
    /// Integer literal
    Int(i64),
    /// Nested call
    Query(Query),
}

/// Builds a query from the arguments of a call, or rejects them with `None`.
pub type QueryConstructor = fn(Vec<Argument>) -> Option<Query>;

/// Name to constructor table consulted by the parser.
#[derive(Debug, Clone)]
pub struct QueryRegistry {
    constructors: HashMap<String, QueryConstructor>,
}

impl QueryRegistry {
    /// A registry with no functions.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry with the built-in functions: `WithTitle`, `WithTag`,
    /// `WithFolder`, `WithinDegree`, `And`, `Or` and `Not`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("WithTitle", |args| single_string(args).map(Query::WithTitle));
        registry.register("WithTag", |args| single_string(args).map(Query::WithTag));
        registry.register("WithFolder", |args| single_string(args).map(Query::WithFolder));
        registry.register("WithinDegree", within_degree);
        registry.register("And", |args| queries_only(args).map(Query::And));
        registry.register("Or", |args| queries_only(args).map(Query::Or));
        registry.register("Not", not);
        registry
    }

    /// Register (or replace) a function.
    pub fn register(&mut self, name: &str, constructor: QueryConstructor) {
        self.constructors.insert(normalize_name(name), constructor);
    }

    /// Look up a function by name, normalizing it first.
    pub fn get(&self, name: &str) -> Option<QueryConstructor> {
        self.constructors.get(&normalize_name(name)).copied()
    }

    /// Check whether a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&normalize_name(name))
    }
}

impl Default for QueryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep only letters, lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

fn single_string(args: Vec<Argument>) -> Option<String> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (None, _) => Some(String::new()),
        (Some(Argument::Str(s)), None) => Some(s),
        _ => None,
    }
}

fn queries_only(args: Vec<Argument>) -> Option<Vec<Query>> {
    args.into_iter()
        .map(|arg| match arg {
            Argument::Query(query) => Some(query),
            _ => None,
        })
        .collect()
}

fn within_degree(args: Vec<Argument>) -> Option<Query> {
    let mut args = args.into_iter();
    let (degree, query) = match (args.next(), args.next(), args.next()) {
        (None, _, _) => (0, None),
        (Some(Argument::Int(degree)), None, _) => (degree, None),
        (Some(Argument::Int(degree)), Some(Argument::Query(query)), None) => {
            (degree, Some(Box::new(query)))
        }
        _ => return None,
    };
    Some(Query::WithinDegree { degree, query })
}

fn not(args: Vec<Argument>) -> Option<Query> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(Argument::Query(query)), None) => Some(Query::negate(query)),
        _ => None,
    }
}

/// Read position over the input text, in bytes.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Start at the beginning of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Whether all input is consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `expected` if it is next.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds and return them.
    pub fn take_while<F>(&mut self, pred: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn skip_separators(&mut self) {
        self.take_while(|c| c.is_whitespace() || c == ',');
    }

    /// Function name: everything up to an unescaped `(`, `)` or `,`.
    fn name(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                '(' | ')' | ',' => break,
                '\\' => {
                    self.bump();
                    self.bump();
                }
                _ => {
                    self.bump();
                }
            }
        }
        &self.input[start..self.pos]
    }

    /// String literal starting at `"`. Unterminated literals run to the end.
    fn string_literal(&mut self) -> String {
        self.eat('"');
        let body = self.take_while(|c| c != '"');
        self.eat('"');
        body.to_string()
    }

    /// Integer literal: the maximal run up to a separator or `)`.
    fn int_literal(&mut self) -> Option<i64> {
        let text = self.take_while(|c| !(c.is_whitespace() || c == ',' || c == ')'));
        text.parse().ok()
    }
}

/// Parser from DSL text to [`Query`].
///
/// ```
/// use notegraph::{Query, QueryParser};
///
/// let parser = QueryParser::new();
/// let query = parser.parse("WithinDegree(2, WithTag(\"#a\"))");
/// assert_eq!(query, Some(Query::within_degree(2, Query::with_tag("#a"))));
/// assert_eq!(parser.parse("Bogus(\"x\")"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    registry: QueryRegistry,
}

impl QueryParser {
    /// A parser over the built-in functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser over a custom registry.
    pub fn with_registry(registry: QueryRegistry) -> Self {
        Self { registry }
    }

    /// The function registry.
    pub fn registry(&self) -> &QueryRegistry {
        &self.registry
    }

    /// The function registry, for registering more functions.
    pub fn registry_mut(&mut self) -> &mut QueryRegistry {
        &mut self.registry
    }

    /// Parse a whole query. Blank or unparseable text gives `None`.
    ///
    /// Text after the first complete call is ignored.
    pub fn parse(&self, text: &str) -> Option<Query> {
        self.parse_call(text.trim_start()).map(|(query, _)| query)
    }

    /// Parse one call at the start of `text`.
    ///
    /// Returns the query and the number of bytes consumed, so a caller can
    /// resume after it.
    pub fn parse_call(&self, text: &str) -> Option<(Query, usize)> {
        let mut cursor = Cursor::new(text);
        let query = self.call(&mut cursor, 0)?;
        Some((query, cursor.position()))
    }

    fn call(&self, cursor: &mut Cursor<'_>, depth: usize) -> Option<Query> {
        if depth > MAX_NESTING {
            trace!("Query nesting exceeds {MAX_NESTING} levels");
            return None;
        }
        let name = cursor.name();
        let Some(constructor) = self.registry.get(name) else {
            trace!("Unknown query function '{}'", name.trim());
            return None;
        };

        let mut args = Vec::new();
        if cursor.eat('(') {
            loop {
                cursor.skip_separators();
                match cursor.peek() {
                    None => break,
                    Some(')') => {
                        cursor.bump();
                        break;
                    }
                    Some('"') => args.push(Argument::Str(cursor.string_literal())),
                    Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                        let Some(value) = cursor.int_literal() else {
                            trace!("Malformed integer literal in '{}'", name.trim());
                            return None;
                        };
                        args.push(Argument::Int(value));
                    }
                    Some(_) => args.push(Argument::Query(self.call(cursor, depth + 1)?)),
                }
            }
        }

        constructor(args)
    }
}

/// Parse `text` with the built-in functions.
pub fn parse(text: &str) -> Option<Query> {
    QueryParser::new().parse(text)
}
