//! Namespace tables and IRI → qualified-name conversion.
//!
//! The resolver starts from the graph's declared prefix table and, when
//! generated prefixes are enabled (always, for RDF/XML), synthesizes
//! `ns<k>` prefixes for namespaces that have none, so every IRI the writer
//! must express as a qualified name can be. It also records which
//! namespaces actually got used, so Turtle only declares those.

use std::collections::{BTreeMap, BTreeSet};

use rdfsort_api::prefix::PrefixMap;
use rdfsort_api::term::Iri;

/// A resolved qualified name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QName {
    pub prefix: String,
    pub local_name: String,
    pub namespace: String,
}

impl QName {
    /// The `prefix:localName` form (just `localName` for the empty prefix).
    pub fn qualified(&self) -> String {
        if self.prefix.is_empty() {
            self.local_name.clone()
        } else {
            format!("{}:{}", self.prefix, self.local_name)
        }
    }
}

/// Prefix table, reverse table and generated-prefix state of one
/// serialization run.
pub struct NamespaceResolver {
    prefix_to_ns: BTreeMap<String, String>,
    ns_to_prefix: BTreeMap<String, String>,
    generated: BTreeSet<String>,
    used_namespaces: BTreeSet<String>,
    next_generated: usize,
    allow_generated: bool,
}

impl NamespaceResolver {
    pub fn new(prefixes: &PrefixMap, allow_generated: bool) -> Self {
        let prefix_to_ns: BTreeMap<String, String> = prefixes
            .iter()
            .map(|(p, n)| (p.to_string(), n.to_string()))
            .collect();
        let ns_to_prefix = prefixes.reverse();
        NamespaceResolver {
            prefix_to_ns,
            ns_to_prefix,
            generated: BTreeSet::new(),
            used_namespaces: BTreeSet::new(),
            next_generated: 1,
            allow_generated,
        }
    }

    /// Make sure `namespace` has a prefix, preferring `preferred` when that
    /// name is still free. Returns the prefix in force.
    pub fn ensure_prefix(&mut self, namespace: &str, preferred: &str) -> String {
        if let Some(prefix) = self.ns_to_prefix.get(namespace) {
            return prefix.clone();
        }
        let prefix = if !self.prefix_to_ns.contains_key(preferred) {
            preferred.to_string()
        } else {
            self.generate_name()
        };
        self.register(prefix.clone(), namespace.to_string());
        prefix
    }

    /// Split `iri` into a qualified name and mark its namespace used.
    ///
    /// Returns `None` when the local name is not a legal XML NCName, or when
    /// the namespace has no prefix and generation is disabled.
    pub fn qname(&mut self, iri: &Iri) -> Option<QName> {
        let namespace = iri.namespace();
        let local_name = iri.local_name();
        if !is_ncname(local_name) {
            return None;
        }
        if let Some(prefix) = self.ns_to_prefix.get(namespace) {
            let q = QName {
                prefix: prefix.clone(),
                local_name: local_name.to_string(),
                namespace: namespace.to_string(),
            };
            self.used_namespaces.insert(namespace.to_string());
            return Some(q);
        }
        if !self.allow_generated {
            return None;
        }
        let prefix = self.generate_name();
        self.generated.insert(prefix.clone());
        self.register(prefix.clone(), namespace.to_string());
        self.used_namespaces.insert(namespace.to_string());
        Some(QName {
            prefix,
            local_name: local_name.to_string(),
            namespace: namespace.to_string(),
        })
    }

    /// Like [`qname`](Self::qname) but without side effects; for callers
    /// that only probe.
    pub fn lookup(&self, iri: &Iri) -> Option<QName> {
        let namespace = iri.namespace();
        let local_name = iri.local_name();
        if !is_ncname(local_name) {
            return None;
        }
        self.ns_to_prefix.get(namespace).map(|prefix| QName {
            prefix: prefix.clone(),
            local_name: local_name.to_string(),
            namespace: namespace.to_string(),
        })
    }

    /// The prefix in force for `namespace`, if any.
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.ns_to_prefix.get(namespace).map(String::as_str)
    }

    /// Record that `namespace` got rendered in shortened form.
    pub fn mark_used(&mut self, namespace: &str) {
        self.used_namespaces.insert(namespace.to_string());
    }

    /// All prefix bindings, in prefix order (the RDF/XML declaration set).
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefix_to_ns
            .iter()
            .map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// The bindings whose namespace was actually used, one winning prefix
    /// per namespace, in prefix order (the Turtle declaration set).
    pub fn used_declarations(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .ns_to_prefix
            .iter()
            .filter(|(ns, _)| self.used_namespaces.contains(*ns))
            .map(|(ns, p)| (p.as_str(), ns.as_str()))
            .collect();
        out.sort();
        out
    }

    /// Whether `prefix` was synthesized during this run.
    pub fn is_generated(&self, prefix: &str) -> bool {
        self.generated.contains(prefix)
    }

    fn register(&mut self, prefix: String, namespace: String) {
        self.ns_to_prefix.insert(namespace.clone(), prefix.clone());
        self.prefix_to_ns.insert(prefix, namespace);
    }

    fn generate_name(&mut self) -> String {
        loop {
            let candidate = format!("ns{}", self.next_generated);
            self.next_generated += 1;
            if !self.prefix_to_ns.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

/// A pragmatic XML NCName check: a name start character followed by name
/// characters, with no colon.
fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
