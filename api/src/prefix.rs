//! Prefix tables: the mapping between namespace prefixes and namespace IRIs.

use std::collections::BTreeMap;

/// An ordered prefix → namespace table.
///
/// The empty prefix is the default namespace. Several prefixes may map to
/// the same namespace; [`reverse`](PrefixMap::reverse) chooses a single
/// winning prefix per namespace (shortest first, ties broken
/// lexicographically) so rendering decisions are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixMap {
    forward: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `prefix` for `namespace`, replacing any earlier binding of
    /// the same prefix.
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.forward.insert(prefix.into(), namespace.into());
    }

    /// The namespace bound to `prefix`, if any.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.forward.get(prefix).map(String::as_str)
    }

    /// All bindings, in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Derive the namespace → prefix table.
    ///
    /// When several prefixes map to one namespace, the shortest prefix wins;
    /// equal lengths tie-break lexicographically.
    pub fn reverse(&self) -> BTreeMap<String, String> {
        let mut reverse: BTreeMap<String, String> = BTreeMap::new();
        for (prefix, namespace) in &self.forward {
            match reverse.get(namespace) {
                Some(winner)
                    if (winner.len(), winner.as_str()) <= (prefix.len(), prefix.as_str()) => {}
                _ => {
                    reverse.insert(namespace.clone(), prefix.clone());
                }
            }
        }
        reverse
    }
}

impl<P, N> FromIterator<(P, N)> for PrefixMap
where
    P: Into<String>,
    N: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (P, N)>>(iter: T) -> Self {
        let mut map = PrefixMap::new();
        for (p, n) in iter {
            map.insert(p, n);
        }
        map
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
