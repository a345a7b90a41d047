//! Detection of RDF collections (`rdf:first` / `rdf:rest` chains).

use std::collections::BTreeSet;

use rdfsort_api::ns::rdf;
use rdfsort_api::term::{BlankNode, Iri, Resource, Term};

use crate::index::TripleMap;

/// Which terms a format accepts as collection members.
///
/// Turtle can inline any member; RDF/XML `parseType="Collection"` only
/// admits resources, so a collection with a literal member falls back to
/// long form there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberFilter {
    AnyTerm,
    ResourceOnly,
}

impl MemberFilter {
    fn admits(self, member: &Term) -> bool {
        match self {
            MemberFilter::AnyTerm => true,
            MemberFilter::ResourceOnly => member.is_resource(),
        }
    }
}

/// Whether `head` starts a well-formed collection under `filter`.
pub fn is_collection(triples: &TripleMap, head: &BlankNode, filter: MemberFilter) -> bool {
    collection_members(triples, head, filter).is_some()
}

/// The member list of the collection starting at `head`, or `None` when the
/// chain is not a well-formed collection: every node must carry exactly one
/// `rdf:first` and one `rdf:rest` and nothing else, the chain must reach
/// `rdf:nil` without revisiting a node, and every member must pass `filter`.
pub fn collection_members(
    triples: &TripleMap,
    head: &BlankNode,
    filter: MemberFilter,
) -> Option<Vec<Term>> {
    collection_chain(triples, head, filter).map(|(members, _)| members)
}

/// Like [`collection_members`], but also returns the chain of list nodes
/// (head first). Writers need the chain to decide whether the whole list can
/// be consumed by inline rendering.
pub fn collection_chain(
    triples: &TripleMap,
    head: &BlankNode,
    filter: MemberFilter,
) -> Option<(Vec<Term>, Vec<BlankNode>)> {
    let first = Iri::new(rdf::first);
    let rest = Iri::new(rdf::rest);
    let mut members = Vec::new();
    let mut chain = Vec::new();
    let mut seen: BTreeSet<BlankNode> = BTreeSet::new();
    let mut current = head.clone();
    loop {
        if !seen.insert(current.clone()) {
            return None;
        }
        chain.push(current.clone());
        let po = triples.get(&Resource::BlankNode(current.clone()))?;
        if po.len() != 2 {
            return None;
        }
        let firsts = po.get(&first)?;
        let rests = po.get(&rest)?;
        if firsts.len() != 1 || rests.len() != 1 {
            return None;
        }
        let member = firsts.iter().next()?;
        if !filter.admits(member) {
            return None;
        }
        members.push(member.clone());
        match rests.iter().next()? {
            Term::Iri(iri) if *iri == rdf::nil => return Some((members, chain)),
            Term::BlankNode(next) => current = next.clone(),
            _ => return None,
        }
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
