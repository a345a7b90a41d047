//! The sorted graph index.
//!
//! [`SortedGraph::build`] turns the caller's statement multiset into
//! everything a format writer needs, in one deterministic pass:
//! the unsorted triple map, its sorted mirror, the sorted ontology and
//! blank-node lists, canonical blank-node labels, the inline analysis and
//! the resolved base IRI. The result is a pure function of the graph and
//! the configuration.

use std::collections::{BTreeMap, BTreeSet};

use rdfsort_api::config::SerializerConfig;
use rdfsort_api::error::{InputDefect, SerializationResult};
use rdfsort_api::graph::Graph;
use rdfsort_api::ns::{owl, rdf};
use rdfsort_api::term::{BlankNode, Iri, Resource, Term};

use crate::cmp::ComparisonContext;
use crate::collection::{collection_members, MemberFilter};

pub type ObjectSet = BTreeSet<Term>;
pub type PredicateMap = BTreeMap<Iri, ObjectSet>;

/// Subject → predicate → object set, free of insertion order.
/// Duplicate statements collapse here; `len` counts distinct triples.
#[derive(Clone, Debug, Default)]
pub struct TripleMap {
    subjects: BTreeMap<Resource, PredicateMap>,
    size: usize,
}

impl TripleMap {
    pub fn insert(&mut self, subject: Resource, predicate: Iri, object: Term) {
        let objects = self
            .subjects
            .entry(subject)
            .or_default()
            .entry(predicate)
            .or_default();
        if objects.insert(object) {
            self.size += 1;
        }
    }

    pub fn get(&self, subject: &Resource) -> Option<&PredicateMap> {
        self.subjects.get(subject)
    }

    pub fn subjects(&self) -> impl Iterator<Item = &Resource> {
        self.subjects.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Resource, &PredicateMap)> {
        self.subjects.iter()
    }

    /// Number of distinct triples.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// One subject of the sorted index: its predicates in sorted order, each
/// with its objects in sorted order.
#[derive(Clone, Debug)]
pub struct SortedSubject {
    pub subject: Resource,
    pub predicates: Vec<(Iri, Vec<Term>)>,
}

/// The fully-sorted view of one graph under one configuration.
#[derive(Debug)]
pub struct SortedGraph {
    triples: TripleMap,
    sorted: Vec<SortedSubject>,
    positions: BTreeMap<Resource, usize>,
    ontologies: Vec<Resource>,
    blank_nodes: Vec<BlankNode>,
    labels: BTreeMap<BlankNode, String>,
    inlined: BTreeSet<BlankNode>,
    object_counts: BTreeMap<BlankNode, usize>,
    base_iri: Option<Iri>,
    member_filter: MemberFilter,
    inline_blank_nodes: bool,
}

impl SortedGraph {
    /// Index and sort `graph`. Fails on input defects (relative IRIs; and,
    /// under inline rendering, blank-node cycles or blank-node subjects no
    /// statement references).
    pub fn build(
        graph: &Graph,
        config: &SerializerConfig,
        member_filter: MemberFilter,
    ) -> SerializationResult<SortedGraph> {
        let mut triples = TripleMap::default();
        let mut ontology_set: BTreeSet<Resource> = BTreeSet::new();

        for statement in graph.statements() {
            let (subject, predicate, mut object) = statement.clone().into_parts();
            if let Resource::Iri(iri) = &subject {
                check_absolute(iri)?;
            }
            check_absolute(&predicate)?;
            if let Term::Iri(iri) = &object {
                check_absolute(iri)?;
            }
            if let (Some(tag), Term::Literal(literal)) =
                (config.override_string_language(), &object)
            {
                if literal.is_plain_string() {
                    object = Term::Literal(literal.clone().with_language(tag));
                }
            }
            if predicate == rdf::type_
                && matches!(&object, Term::Iri(iri) if *iri == owl::Ontology)
            {
                ontology_set.insert(subject.clone());
            }
            triples.insert(subject, predicate, object);
        }

        let mut blank_node_set: BTreeSet<BlankNode> = BTreeSet::new();
        let mut object_counts: BTreeMap<BlankNode, usize> = BTreeMap::new();
        for subject in triples.subjects() {
            if let Resource::BlankNode(b) = subject {
                blank_node_set.insert(b.clone());
            }
        }
        for (_, po) in triples.iter() {
            for objects in po.values() {
                for object in objects {
                    if let Term::BlankNode(b) = object {
                        blank_node_set.insert(b.clone());
                        *object_counts.entry(b.clone()).or_default() += 1;
                    }
                }
            }
        }

        let ctx = ComparisonContext::new(&triples, member_filter, config.inline_blank_nodes());

        let mut subjects: Vec<Resource> = triples.subjects().cloned().collect();
        subjects.sort_by(|a, b| ctx.cmp_resources(a, b));

        let mut sorted = Vec::with_capacity(subjects.len());
        let mut sorted_size = 0;
        for subject in subjects {
            let Some(po) = triples.get(&subject) else {
                continue;
            };
            let mut predicates = Vec::with_capacity(po.len());
            for (predicate, objects) in po {
                let mut objects: Vec<Term> = objects.iter().cloned().collect();
                objects.sort_by(|a, b| ctx.cmp_terms(a, b));
                sorted_size += objects.len();
                predicates.push((predicate.clone(), objects));
            }
            sorted.push(SortedSubject {
                subject,
                predicates,
            });
        }
        if sorted_size != triples.len() {
            // indicative of a comparator bug; the sorted data still gets written
            tracing::warn!(
                sorted = sorted_size,
                unsorted = triples.len(),
                "triples unexpectedly lost or gained during sorting"
            );
        }
        let positions: BTreeMap<Resource, usize> = sorted
            .iter()
            .enumerate()
            .map(|(i, s)| (s.subject.clone(), i))
            .collect();

        let mut ontologies: Vec<Resource> = ontology_set.into_iter().collect();
        ontologies.sort_by(|a, b| ctx.cmp_resources(a, b));

        let mut blank_nodes: Vec<BlankNode> = blank_node_set.into_iter().collect();
        blank_nodes.sort_by(|a, b| ctx.cmp_blank_nodes(a, b));

        let labels: BTreeMap<BlankNode, String> = blank_nodes
            .iter()
            .enumerate()
            .map(|(i, b)| (b.clone(), format!("a{}", i + 1)))
            .collect();

        let mut inlined: BTreeSet<BlankNode> = BTreeSet::new();
        if config.inline_blank_nodes() {
            for b in &blank_nodes {
                let references = object_counts.get(b).copied().unwrap_or(0);
                let is_subject = triples.get(&Resource::BlankNode(b.clone())).is_some();
                if references == 0 && is_subject {
                    return Err(
                        InputDefect::UnreferencedBlankNodeSubject(b.id().to_string()).into()
                    );
                }
                if references == 1 {
                    inlined.insert(b.clone());
                }
            }
            detect_cycles(&triples, &blank_nodes)?;
        }

        let base_iri = config.base_iri().cloned().or_else(|| {
            if config.infer_base_iri() {
                ontologies.iter().find_map(|r| r.as_iri().cloned())
            } else {
                None
            }
        });

        tracing::debug!(
            subjects = sorted.len(),
            blank_nodes = blank_nodes.len(),
            ontologies = ontologies.len(),
            "sorted graph index built"
        );

        Ok(SortedGraph {
            triples,
            sorted,
            positions,
            ontologies,
            blank_nodes,
            labels,
            inlined,
            object_counts,
            base_iri,
            member_filter,
            inline_blank_nodes: config.inline_blank_nodes(),
        })
    }

    /// The unsorted triple map (used for structural comparison and
    /// collection lookups).
    pub fn triples(&self) -> &TripleMap {
        &self.triples
    }

    /// A comparison context over this index, labels included.
    pub fn context(&self) -> ComparisonContext<'_> {
        ComparisonContext::new(&self.triples, self.member_filter, self.inline_blank_nodes)
            .with_labels(&self.labels)
    }

    /// All subjects in sorted order.
    pub fn subjects(&self) -> &[SortedSubject] {
        &self.sorted
    }

    /// The sorted predicate/object entries of one subject.
    pub fn predicates_of(&self, subject: &Resource) -> Option<&[(Iri, Vec<Term>)]> {
        self.positions
            .get(subject)
            .map(|&i| self.sorted[i].predicates.as_slice())
    }

    /// Subjects with `rdf:type owl:Ontology`, sorted.
    pub fn ontologies(&self) -> &[Resource] {
        &self.ontologies
    }

    /// All blank nodes of the graph, sorted.
    pub fn blank_nodes(&self) -> &[BlankNode] {
        &self.blank_nodes
    }

    /// The canonical label of a blank node (without the `_:` sigil).
    /// Every blank node of the indexed graph has one; for anything else the
    /// original identifier is returned.
    pub fn label<'a>(&'a self, node: &'a BlankNode) -> &'a str {
        self.labels
            .get(node)
            .map(String::as_str)
            .unwrap_or_else(|| node.id())
    }

    /// The resolved base IRI: explicit, else inferred, else none.
    pub fn base_iri(&self) -> Option<&Iri> {
        self.base_iri.as_ref()
    }

    /// Whether this blank node gets rendered inline at its single
    /// reference site.
    pub fn is_inlined(&self, node: &BlankNode) -> bool {
        self.inlined.contains(node)
    }

    /// How many object positions reference this blank node.
    pub fn object_count(&self, node: &BlankNode) -> usize {
        self.object_counts.get(node).copied().unwrap_or(0)
    }

    /// The member list of the collection headed by `node`, under this
    /// index's member filter.
    pub fn collection_members(&self, node: &BlankNode) -> Option<Vec<Term>> {
        collection_members(&self.triples, node, self.member_filter)
    }

    /// The member list of the collection headed by `node`, but only when
    /// inline rendering can consume the whole chain: every interior list
    /// node must be referenced exactly once (by its predecessor).
    pub fn inline_collection(&self, node: &BlankNode) -> Option<Vec<Term>> {
        let (members, chain) =
            crate::collection::collection_chain(&self.triples, node, self.member_filter)?;
        if chain[1..].iter().any(|n| self.object_count(n) != 1) {
            return None;
        }
        Some(members)
    }

    /// The subjects to emit at the top level, in emission order: ontology
    /// subjects first, then all remaining subjects, skipping blank nodes
    /// that will be rendered inline.
    pub fn emission_subjects(&self) -> Vec<&Resource> {
        let ontology_set: BTreeSet<&Resource> = self.ontologies.iter().collect();
        let mut out: Vec<&Resource> = Vec::with_capacity(self.sorted.len());
        out.extend(self.ontologies.iter());
        for entry in &self.sorted {
            if ontology_set.contains(&entry.subject) {
                continue;
            }
            if let Resource::BlankNode(b) = &entry.subject {
                if self.is_inlined(b) {
                    continue;
                }
            }
            out.push(&entry.subject);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

fn check_absolute(iri: &Iri) -> Result<(), InputDefect> {
    if iri.is_absolute() {
        Ok(())
    } else {
        Err(InputDefect::UnresolvableIri(iri.as_str().to_string()))
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Grey,
    Black,
}

/// DFS over the blank-node graph with a visited-on-stack set; any back edge
/// is a cycle, which inline rendering cannot express.
fn detect_cycles(triples: &TripleMap, blank_nodes: &[BlankNode]) -> Result<(), InputDefect> {
    let mut marks: BTreeMap<&BlankNode, Mark> = BTreeMap::new();
    for node in blank_nodes {
        visit(node, triples, &mut marks)?;
    }
    Ok(())
}

fn visit<'a>(
    node: &'a BlankNode,
    triples: &'a TripleMap,
    marks: &mut BTreeMap<&'a BlankNode, Mark>,
) -> Result<(), InputDefect> {
    match marks.get(node) {
        Some(Mark::Grey) => return Err(InputDefect::BlankNodeCycle(node.id().to_string())),
        Some(Mark::Black) => return Ok(()),
        None => {}
    }
    marks.insert(node, Mark::Grey);
    if let Some(po) = triples.get(&Resource::BlankNode(node.clone())) {
        for objects in po.values() {
            for object in objects {
                if let Term::BlankNode(next) = object {
                    visit(next, triples, marks)?;
                }
            }
        }
    }
    marks.insert(node, Mark::Black);
    Ok(())
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
