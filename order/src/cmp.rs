//! Canonical total order over terms and statements.
//!
//! The order is what makes the output independent of statement insertion
//! order and of original blank-node labels:
//!
//! 1. terms rank by variant: IRI < blank node < literal;
//! 2. IRIs compare by code point;
//! 3. literals compare by lexical form, then language tag (absent first),
//!    then datatype IRI;
//! 4. blank nodes compare *structurally*, by their outbound
//!    predicate/object maps under this same order, recursively.
//!
//! Blank-node comparison needs the unsorted triple map, so every comparison
//! goes through a [`ComparisonContext`]. A visited-pair set breaks recursion
//! through blank-node cycles; once canonical labels have been assigned they
//! serve as the final tie-break.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rdfsort_api::ns::{owl, rdf, rdfs};
use rdfsort_api::term::{BlankNode, Iri, Literal, Resource, Term};

use crate::collection::{collection_members, MemberFilter};
use crate::index::{ObjectSet, TripleMap};

/// Predicates rendered before all others under a given subject,
/// in this order.
pub const FIRST_PREDICATES: &[&str] = &[
    rdf::type_,
    rdfs::subClassOf,
    rdfs::subPropertyOf,
    owl::equivalentClass,
    owl::equivalentProperty,
    rdfs::domain,
    rdfs::range,
    rdfs::label,
    rdfs::comment,
];

/// When a subject has several `rdf:type` values, the preference order used
/// to pick the RDF/XML element name and to order the emitted type list.
pub const PREFERRED_RDF_TYPES: &[&str] = &[
    owl::NamedIndividual,
    owl::Class,
    owl::ObjectProperty,
    owl::DatatypeProperty,
    owl::AnnotationProperty,
    owl::Ontology,
];

/// Everything a canonical comparison may need to look at: the unsorted
/// triple map (blank nodes compare by their outbound content), the
/// blank-node label map once assigned, and whether collections compare by
/// member list.
#[derive(Clone, Copy)]
pub struct ComparisonContext<'a> {
    triples: &'a TripleMap,
    labels: Option<&'a BTreeMap<BlankNode, String>>,
    inline_collections: bool,
    member_filter: MemberFilter,
}

impl<'a> ComparisonContext<'a> {
    pub fn new(triples: &'a TripleMap, member_filter: MemberFilter, inline_collections: bool) -> Self {
        ComparisonContext {
            triples,
            labels: None,
            inline_collections,
            member_filter,
        }
    }

    /// This context with canonical labels available as tie-break.
    pub fn with_labels(mut self, labels: &'a BTreeMap<BlankNode, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn cmp_terms(&self, a: &Term, b: &Term) -> Ordering {
        let mut visited = BTreeSet::new();
        self.cmp_terms_inner(a, b, &mut visited)
    }

    pub fn cmp_resources(&self, a: &Resource, b: &Resource) -> Ordering {
        match (a, b) {
            (Resource::Iri(x), Resource::Iri(y)) => x.cmp(y),
            (Resource::Iri(_), Resource::BlankNode(_)) => Ordering::Less,
            (Resource::BlankNode(_), Resource::Iri(_)) => Ordering::Greater,
            (Resource::BlankNode(x), Resource::BlankNode(y)) => self.cmp_blank_nodes(x, y),
        }
    }

    pub fn cmp_blank_nodes(&self, a: &BlankNode, b: &BlankNode) -> Ordering {
        let mut visited = BTreeSet::new();
        self.cmp_blank_nodes_inner(a, b, &mut visited)
    }

    /// Statements compare by subject, then predicate, then object.
    pub fn cmp_statements(
        &self,
        a: &(Resource, Iri, Term),
        b: &(Resource, Iri, Term),
    ) -> Ordering {
        self.cmp_resources(&a.0, &b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| self.cmp_terms(&a.2, &b.2))
    }

    fn cmp_terms_inner(&self, a: &Term, b: &Term, visited: &mut VisitedPairs) -> Ordering {
        match (a, b) {
            (Term::Iri(x), Term::Iri(y)) => x.cmp(y),
            (Term::BlankNode(x), Term::BlankNode(y)) => self.cmp_blank_nodes_inner(x, y, visited),
            (Term::Literal(x), Term::Literal(y)) => cmp_literals(x, y),
            _ => rank(a).cmp(&rank(b)),
        }
    }

    fn cmp_blank_nodes_inner(
        &self,
        a: &BlankNode,
        b: &BlankNode,
        visited: &mut VisitedPairs,
    ) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        if !visited.insert((a.id().to_string(), b.id().to_string())) {
            // recursion through a cycle: settle on the labels, if any
            return self.cmp_labels(a, b);
        }
        if self.inline_collections {
            let ca = collection_members(self.triples, a, self.member_filter);
            let cb = collection_members(self.triples, b, self.member_filter);
            match (&ca, &cb) {
                (Some(ma), Some(mb)) => {
                    for (x, y) in ma.iter().zip(mb.iter()) {
                        let o = self.cmp_terms_inner(x, y, visited);
                        if o != Ordering::Equal {
                            return o;
                        }
                    }
                    return ma
                        .len()
                        .cmp(&mb.len())
                        .then_with(|| self.cmp_labels(a, b));
                }
                // collections sort before other blank nodes
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => {}
            }
        }
        let pa = self.triples.get(&Resource::BlankNode(a.clone()));
        let pb = self.triples.get(&Resource::BlankNode(b.clone()));
        match (pa, pb) {
            (None, None) => self.cmp_labels(a, b),
            // content-free blank nodes sort first
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(pa), Some(pb)) => {
                let mut ia = pa.iter();
                let mut ib = pb.iter();
                loop {
                    match (ia.next(), ib.next()) {
                        (None, None) => return self.cmp_labels(a, b),
                        (None, Some(_)) => return Ordering::Less,
                        (Some(_), None) => return Ordering::Greater,
                        (Some((ka, va)), Some((kb, vb))) => {
                            let o = ka
                                .cmp(kb)
                                .then_with(|| self.cmp_object_sets(va, vb, visited));
                            if o != Ordering::Equal {
                                return o;
                            }
                        }
                    }
                }
            }
        }
    }

    fn cmp_object_sets(&self, a: &ObjectSet, b: &ObjectSet, visited: &mut VisitedPairs) -> Ordering {
        let mut va: Vec<&Term> = a.iter().collect();
        let mut vb: Vec<&Term> = b.iter().collect();
        va.sort_by(|x, y| self.cmp_terms_inner(x, y, visited));
        vb.sort_by(|x, y| self.cmp_terms_inner(x, y, visited));
        for (x, y) in va.iter().zip(vb.iter()) {
            let o = self.cmp_terms_inner(x, y, visited);
            if o != Ordering::Equal {
                return o;
            }
        }
        va.len().cmp(&vb.len())
    }

    fn cmp_labels(&self, a: &BlankNode, b: &BlankNode) -> Ordering {
        match self.labels {
            Some(labels) => match (labels.get(a), labels.get(b)) {
                (Some(x), Some(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
            None => Ordering::Equal,
        }
    }
}

type VisitedPairs = BTreeSet<(String, String)>;

fn rank(term: &Term) -> u8 {
    match term {
        Term::Iri(_) => 0,
        Term::BlankNode(_) => 1,
        Term::Literal(_) => 2,
    }
}

fn cmp_literals(a: &Literal, b: &Literal) -> Ordering {
    a.lexical_form()
        .cmp(b.lexical_form())
        // absent language tags order before present ones
        .then_with(|| a.language().cmp(&b.language()))
        .then_with(|| a.datatype().cmp(b.datatype()))
}

/// The given predicate/object entries in rendering order: every "first
/// predicate" present, in [`FIRST_PREDICATES`] order, then the remaining
/// predicates in their sorted order.
pub fn order_predicates(predicates: &[(Iri, Vec<Term>)]) -> Vec<&(Iri, Vec<Term>)> {
    let mut ordered = Vec::with_capacity(predicates.len());
    for first in FIRST_PREDICATES {
        if let Some(entry) = predicates.iter().find(|(p, _)| p.as_str() == *first) {
            ordered.push(entry);
        }
    }
    ordered.extend(
        predicates
            .iter()
            .filter(|(p, _)| !FIRST_PREDICATES.contains(&p.as_str())),
    );
    ordered
}

/// The given (sorted) `rdf:type` objects in rendering order: preferred types
/// first, in [`PREFERRED_RDF_TYPES`] order, then the rest unchanged.
pub fn order_types(objects: &[Term]) -> Vec<&Term> {
    let mut ordered = Vec::with_capacity(objects.len());
    for preferred in PREFERRED_RDF_TYPES {
        if let Some(t) = objects
            .iter()
            .find(|t| matches!(t, Term::Iri(iri) if iri.as_str() == *preferred))
        {
            ordered.push(t);
        }
    }
    ordered.extend(objects.iter().filter(|t| {
        !matches!(t, Term::Iri(iri) if PREFERRED_RDF_TYPES.contains(&iri.as_str()))
    }));
    ordered
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use rdfsort_api::term::Literal;
    use std::cmp::Ordering::*;
    use test_case::test_case;

    fn empty_ctx(triples: &TripleMap) -> ComparisonContext<'_> {
        ComparisonContext::new(triples, MemberFilter::AnyTerm, false)
    }

    fn iri(s: &str) -> Term {
        Term::Iri(Iri::new(s))
    }

    #[test]
    fn variant_rank() {
        let triples = TripleMap::default();
        let ctx = empty_ctx(&triples);
        let i = iri("http://a.example/x");
        let b = Term::BlankNode(BlankNode::new("x"));
        let l = Term::Literal(Literal::simple("x"));
        assert_eq!(ctx.cmp_terms(&i, &b), Less);
        assert_eq!(ctx.cmp_terms(&b, &l), Less);
        assert_eq!(ctx.cmp_terms(&l, &i), Greater);
    }

    #[test_case("http://a.example/x", "http://a.example/y", Less)]
    #[test_case("http://a.example/y", "http://a.example/x", Greater)]
    #[test_case("http://a.example/x", "http://a.example/x", Equal)]
    #[test_case("http://A.example/x", "http://a.example/x", Less; "code point order")]
    fn iris(a: &str, b: &str, expected: Ordering) {
        let triples = TripleMap::default();
        let ctx = empty_ctx(&triples);
        assert_eq!(ctx.cmp_terms(&iri(a), &iri(b)), expected);
    }

    #[test]
    fn literals() {
        let triples = TripleMap::default();
        let ctx = empty_ctx(&triples);
        let plain = Term::Literal(Literal::simple("x"));
        let tagged = Term::Literal(Literal::lang("x", "en"));
        let typed = Term::Literal(Literal::typed("x", Iri::new("http://a.example/dt")));
        // same lexical form: absent language tag first, then datatype IRI
        assert_eq!(ctx.cmp_terms(&typed, &tagged), Less);
        assert_eq!(ctx.cmp_terms(&typed, &plain), Less);
        assert_eq!(ctx.cmp_terms(&plain, &tagged), Less);
        // lexical form dominates
        let earlier = Term::Literal(Literal::lang("a", "en"));
        assert_eq!(ctx.cmp_terms(&earlier, &plain), Less);
    }

    #[test]
    fn blank_nodes_by_content() {
        let mut triples = TripleMap::default();
        let p = Iri::new("http://a.example/p");
        triples.insert(
            Resource::BlankNode(BlankNode::new("zzz")),
            p.clone(),
            Term::Literal(Literal::simple("1")),
        );
        triples.insert(
            Resource::BlankNode(BlankNode::new("aaa")),
            p.clone(),
            Term::Literal(Literal::simple("2")),
        );
        let ctx = empty_ctx(&triples);
        // content decides, not the identifier
        assert_eq!(
            ctx.cmp_blank_nodes(&BlankNode::new("zzz"), &BlankNode::new("aaa")),
            Less
        );
    }

    #[test]
    fn blank_node_cycle_terminates() {
        let mut triples = TripleMap::default();
        let p = Iri::new("http://a.example/p");
        triples.insert(
            Resource::BlankNode(BlankNode::new("x")),
            p.clone(),
            Term::BlankNode(BlankNode::new("y")),
        );
        triples.insert(
            Resource::BlankNode(BlankNode::new("y")),
            p.clone(),
            Term::BlankNode(BlankNode::new("x")),
        );
        let ctx = empty_ctx(&triples);
        // the two nodes are structurally indistinguishable
        assert_eq!(ctx.cmp_blank_nodes(&BlankNode::new("x"), &BlankNode::new("y")), Equal);
    }

    #[test]
    fn labels_break_ties() {
        let mut triples = TripleMap::default();
        let p = Iri::new("http://a.example/p");
        for id in ["x", "y"] {
            triples.insert(
                Resource::BlankNode(BlankNode::new(id)),
                p.clone(),
                Term::Literal(Literal::simple("same")),
            );
        }
        let labels: BTreeMap<BlankNode, String> = [
            (BlankNode::new("x"), "a2".to_string()),
            (BlankNode::new("y"), "a1".to_string()),
        ]
        .into_iter()
        .collect();
        let ctx = ComparisonContext::new(&triples, MemberFilter::AnyTerm, false).with_labels(&labels);
        assert_eq!(ctx.cmp_blank_nodes(&BlankNode::new("y"), &BlankNode::new("x")), Less);
    }

    #[test]
    fn predicate_priority() {
        let entries = vec![
            (Iri::new("http://a.example/p"), vec![]),
            (Iri::new(rdfs::label), vec![]),
            (Iri::new(rdf::type_), vec![]),
        ];
        let ordered: Vec<&str> = order_predicates(&entries)
            .into_iter()
            .map(|(p, _)| p.as_str())
            .collect();
        assert_eq!(ordered, vec![rdf::type_, rdfs::label, "http://a.example/p"]);
    }

    #[test]
    fn preferred_types_first() {
        let objects = vec![
            iri("http://a.example/Custom"),
            iri(owl::Class),
            iri(owl::NamedIndividual),
        ];
        let ordered: Vec<&str> = order_types(&objects)
            .into_iter()
            .map(|t| t.as_iri().unwrap().as_str())
            .collect();
        assert_eq!(
            ordered,
            vec![owl::NamedIndividual, owl::Class, "http://a.example/Custom"]
        );
    }
}
