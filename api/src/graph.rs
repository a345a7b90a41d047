//! The in-memory graph handed to the serializer.

use crate::prefix::PrefixMap;
use crate::statement::Statement;

/// A fully-materialized RDF graph: a multiset of statements plus the prefix
/// table declared by the source document.
///
/// This is the engine's sole input (together with the configuration record);
/// parsing into it is the caller's business.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    statements: Vec<Statement>,
    prefixes: PrefixMap,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn extend(&mut self, statements: impl IntoIterator<Item = Statement>) {
        self.statements.extend(statements);
    }

    /// Declare a namespace prefix (the empty prefix is the default
    /// namespace).
    pub fn set_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix, namespace);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl FromIterator<Statement> for Graph {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        let mut g = Graph::new();
        g.extend(iter);
        g
    }
}
