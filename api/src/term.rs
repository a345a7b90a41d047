//! Term model for the sorted serializer.
//!
//! Terms form a closed, three-case taxonomy (IRI, blank node, literal)
//! expressed as plain enums over owned strings: the engine materializes the
//! whole graph anyway, so there is nothing to gain from borrowed variants.
//!
//! The `Ord` implementations derived here are *stable but not canonical*:
//! variant rank and literal field order happen to match the canonical order,
//! but blank nodes compare by their opaque identifier. They exist so terms
//! can serve as keys of ordered maps; every ordering that reaches the output
//! goes through the comparator of `rdfsort-order` instead.

use std::fmt;

use crate::ns::{rdf, xsd};

/// An IRI term, compared by its absolute string form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(String);

impl Iri {
    /// Wrap the given string as an IRI. No syntax checking is performed;
    /// resolvability is checked once, when the graph is indexed.
    pub fn new(value: impl Into<String>) -> Self {
        Iri(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The longest leading part of the IRI ending at `#`, `/` or `:`.
    ///
    /// Every absolute IRI contains at least the `:` after its scheme,
    /// so this never returns the whole IRI for resolvable input.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(['#', '/', ':']) {
            Some(i) => &self.0[..=i],
            None => &self.0,
        }
    }

    /// The part of the IRI after [`namespace`](Self::namespace).
    pub fn local_name(&self) -> &str {
        match self.0.rfind(['#', '/', ':']) {
            Some(i) => &self.0[i + 1..],
            None => "",
        }
    }

    /// Whether the IRI carries a scheme. The engine refuses to serialize
    /// relative IRIs, which would not survive a round trip.
    pub fn is_absolute(&self) -> bool {
        self.0.contains(':')
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Iri::new(value)
    }
}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Iri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A blank node, identified by an opaque label.
///
/// The label only distinguishes blank nodes within one graph; it is never
/// preserved in output (the relabeler assigns canonical labels instead).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlankNode(String);

impl BlankNode {
    pub fn new(id: impl Into<String>) -> Self {
        BlankNode(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

impl From<&str> for BlankNode {
    fn from(id: &str) -> Self {
        BlankNode::new(id)
    }
}

/// An RDF literal: a lexical form with a datatype IRI and, for
/// language-tagged strings, a language tag.
///
/// Per RDF 1.1 the datatype is always present: plain literals are
/// `xsd:string`, language-tagged ones are `rdf:langString`. Whether the
/// datatype is *emitted* is the writers' business, not the model's.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    lexical: String,
    language: Option<String>,
    datatype: Iri,
}

impl Literal {
    /// A plain string literal (`xsd:string`).
    pub fn simple(lexical: impl Into<String>) -> Self {
        Literal {
            lexical: lexical.into(),
            language: None,
            datatype: Iri::new(xsd::string),
        }
    }

    /// A language-tagged string (`rdf:langString`).
    /// The tag is shaped with [`normalize_language_tag`].
    pub fn lang(lexical: impl Into<String>, tag: &str) -> Self {
        Literal {
            lexical: lexical.into(),
            language: Some(normalize_language_tag(tag)),
            datatype: Iri::new(rdf::langString),
        }
    }

    /// A datatyped literal.
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Literal {
            lexical: lexical.into(),
            language: None,
            datatype,
        }
    }

    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }

    /// Whether this is a plain `xsd:string` literal without a language tag.
    pub fn is_plain_string(&self) -> bool {
        self.language.is_none() && self.datatype == xsd::string
    }

    /// This literal with the given language tag applied
    /// (used by the string-language override).
    pub fn with_language(self, tag: &str) -> Self {
        Literal::lang(self.lexical, tag)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        match &self.language {
            Some(tag) => write!(f, "@{tag}"),
            None => write!(f, "^^{}", self.datatype),
        }
    }
}

/// Shape a language tag for stable output: lowercase primary subtag,
/// uppercase second subtag (`en-us` becomes `en-US`). Full BCP 47
/// canonicalization is out of scope.
pub fn normalize_language_tag(tag: &str) -> String {
    let mut parts: Vec<String> = tag.split('-').map(str::to_owned).collect();
    parts[0] = parts[0].to_ascii_lowercase();
    if parts.len() > 1 {
        parts[1] = parts[1].to_ascii_uppercase();
    }
    parts.join("-")
}

/// Any RDF term. The variant order fixes the rank used by the canonical
/// comparator: IRI < BlankNode < Literal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(Iri),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Term {
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Whether this term may appear in subject position.
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Term::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::BlankNode(b) => b.fmt(f),
            Term::Literal(l) => l.fmt(f),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Term::BlankNode(b)
    }
}

impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Term::Literal(l)
    }
}

/// A term allowed in subject position (IRI or blank node).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Iri(Iri),
    BlankNode(BlankNode),
}

impl Resource {
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Resource::Iri(iri) => Some(iri),
            Resource::BlankNode(_) => None,
        }
    }

    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Resource::Iri(_) => None,
            Resource::BlankNode(b) => Some(b),
        }
    }

    pub fn to_term(&self) -> Term {
        match self {
            Resource::Iri(iri) => Term::Iri(iri.clone()),
            Resource::BlankNode(b) => Term::BlankNode(b.clone()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Iri(iri) => iri.fmt(f),
            Resource::BlankNode(b) => b.fmt(f),
        }
    }
}

impl From<Iri> for Resource {
    fn from(iri: Iri) -> Self {
        Resource::Iri(iri)
    }
}

impl From<BlankNode> for Resource {
    fn from(b: BlankNode) -> Self {
        Resource::BlankNode(b)
    }
}

impl From<Resource> for Term {
    fn from(r: Resource) -> Self {
        match r {
            Resource::Iri(iri) => Term::Iri(iri),
            Resource::BlankNode(b) => Term::BlankNode(b),
        }
    }
}

impl TryFrom<Term> for Resource {
    type Error = Term;

    fn try_from(term: Term) -> Result<Self, Term> {
        match term {
            Term::Iri(iri) => Ok(Resource::Iri(iri)),
            Term::BlankNode(b) => Ok(Resource::BlankNode(b)),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
