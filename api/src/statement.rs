//! RDF statements (triples).

use std::fmt;

use crate::term::{Iri, Resource, Term};

/// An immutable `(subject, predicate, object)` assertion.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Statement {
    subject: Resource,
    predicate: Iri,
    object: Term,
}

impl Statement {
    pub fn new(subject: impl Into<Resource>, predicate: impl Into<Iri>, object: impl Into<Term>) -> Self {
        Statement {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn subject(&self) -> &Resource {
        &self.subject
    }

    pub fn predicate(&self) -> &Iri {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    /// Decompose into owned parts.
    pub fn into_parts(self) -> (Resource, Iri, Term) {
        (self.subject, self.predicate, self.object)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
