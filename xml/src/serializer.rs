//! Serializer for the [RDF/XML] concrete syntax of RDF.
//!
//! **Important**:
//! the methods in this module accepting a [`Write`]
//! make no effort to minimize the number of write operations.
//! Hence, in most cases, they should be passed a [`BufWriter`].
//!
//! [RDF/XML]: https://www.w3.org/TR/rdf-syntax-grammar/
//! [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
//! [`BufWriter`]: https://doc.rust-lang.org/std/io/struct.BufWriter.html

use std::io;

use rdfsort_api::config::{SerializerConfig, StringDataType};
use rdfsort_api::error::{InputDefect, SerializationResult};
use rdfsort_api::graph::Graph;
use rdfsort_api::ns::{owl, rdf, xsd};
use rdfsort_api::term::{Iri, Literal, Resource, Term};
use rdfsort_order::{
    order_predicates, order_types, MemberFilter, NamespaceResolver, SortedGraph,
    PREFERRED_RDF_TYPES,
};

use crate::stream::XmlStreamWriter;

/// RDF/XML serializer over the sorted graph index.
pub struct RdfXmlSerializer<W> {
    config: SerializerConfig,
    write: W,
}

impl<W> RdfXmlSerializer<W>
where
    W: io::Write,
{
    /// Build a new RDF/XML serializer writing to `write`, with the default config.
    #[inline]
    pub fn new(write: W) -> RdfXmlSerializer<W> {
        Self::new_with_config(write, SerializerConfig::default())
    }

    /// Build a new RDF/XML serializer writing to `write`, with the given config.
    pub fn new_with_config(write: W, config: SerializerConfig) -> RdfXmlSerializer<W> {
        RdfXmlSerializer { config, write }
    }

    /// Borrow this serializer's configuration.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a whole graph in canonical order.
    pub fn serialize_graph(&mut self, graph: &Graph) -> SerializationResult<&mut Self> {
        self.config.validate()?;
        write_graph(&mut self.write, graph, &self.config)?;
        self.write.flush()?;
        Ok(self)
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl RdfXmlSerializer<Vec<u8>> {
    /// Create a new serializer which targets a `String`.
    #[inline]
    pub fn new_stringifier() -> Self {
        RdfXmlSerializer::new(Vec::new())
    }

    /// Create a new serializer which targets a `String` with a custom config.
    #[inline]
    pub fn new_stringifier_with_config(config: SerializerConfig) -> Self {
        RdfXmlSerializer::new_with_config(Vec::new(), config)
    }

    /// Borrow the serialized bytes.
    pub fn as_utf8(&self) -> &[u8] {
        &self.write[..]
    }

    /// Borrow the serialized data as a `str`.
    pub fn as_str(&self) -> &str {
        unsafe {
            // SAFETY: the writer only ever produces UTF-8
            std::str::from_utf8_unchecked(self.as_utf8())
        }
    }
}

fn write_graph<W: io::Write>(
    write: &mut W,
    graph: &Graph,
    config: &SerializerConfig,
) -> SerializationResult<()> {
    let sorted = SortedGraph::build(graph, config, MemberFilter::ResourceOnly)?;
    // RDF/XML must turn every predicate into a QName, so generated prefixes
    // are always enabled here.
    let mut resolver = NamespaceResolver::new(graph.prefixes(), true);
    let rdf_prefix = resolver.ensure_prefix(rdf::NS, "rdf");

    // The body is rendered first, into a buffer: rendering is what creates
    // generated prefixes, and the root element must declare all of them.
    let mut body: Vec<u8> = Vec::new();
    {
        let mut out =
            XmlStreamWriter::fragment(&mut body, config.indent(), config.line_end(), 1);
        let mut subjects = SubjectWriter {
            out: &mut out,
            sorted: &sorted,
            resolver: &mut resolver,
            config,
            rdf_prefix: rdf_prefix.clone(),
        };
        for subject in sorted.emission_subjects() {
            subjects.write_subject(subject)?;
        }
    }

    let mut out = XmlStreamWriter::new(write, config.indent(), config.line_end());
    out.write_declaration()?;
    if config.use_dtd_subset() {
        let entities: Vec<(&str, &str)> = resolver
            .declarations()
            .filter(|(prefix, _)| !prefix.is_empty() && *prefix != "xml")
            .collect();
        out.write_dtd(&format!("{rdf_prefix}:RDF"), &entities)?;
    }
    out.start_element(&format!("{rdf_prefix}:RDF"))?;
    if let Some(base) = sorted.base_iri() {
        out.write_attribute("xml:base", base.as_str())?;
    }
    for (prefix, namespace) in resolver.declarations() {
        if prefix == "xml" {
            continue;
        }
        if prefix.is_empty() {
            out.write_attribute("xmlns", namespace)?;
        } else {
            out.write_attribute(&format!("xmlns:{prefix}"), namespace)?;
        }
    }
    write_banner_comments(&mut out, config.leading_comments(), config)?;
    if !body.is_empty() {
        out.write_raw(&body)?;
    }
    write_banner_comments(&mut out, config.trailing_comments(), config)?;
    out.end_element()?;
    out.write_eol()?;
    out.finish()?;
    Ok(())
}

/// Comment text with `--` rewritten, keeping the XML comment legal.
pub fn escape_comment_text(comment: &str) -> String {
    comment.replace("--", "&#x2D;&#x2D;")
}

/// The `####`-banner comment block placed at the top and bottom of a
/// document.
fn write_banner_comments<W: io::Write>(
    out: &mut XmlStreamWriter<W>,
    comments: &[String],
    config: &SerializerConfig,
) -> io::Result<()> {
    if comments.is_empty() {
        return Ok(());
    }
    let indent = config.indent();
    let line_end = config.line_end();
    let escaped: Vec<String> = comments.iter().map(|c| escape_comment_text(c)).collect();
    let surround = format!("{line_end}{indent}####");
    let join = format!("{line_end}{indent}## ");
    let content = format!(
        "{surround}{join}{}{surround}{line_end}{indent}",
        escaped.join(&join)
    );
    out.write_comment(&content)
}

struct SubjectWriter<'a, W: io::Write> {
    out: &'a mut XmlStreamWriter<W>,
    sorted: &'a SortedGraph,
    resolver: &'a mut NamespaceResolver,
    config: &'a SerializerConfig,
    rdf_prefix: String,
}

impl<W: io::Write> SubjectWriter<'_, W> {
    fn write_subject(&mut self, subject: &Resource) -> SerializationResult<()> {
        let sorted = self.sorted;
        let predicates = sorted.predicates_of(subject).unwrap_or(&[]);

        let enclosing = self.choose_enclosing_type(predicates);
        let element_name = match &enclosing {
            Some(iri) => self.element_name(iri)?,
            None => format!("{}:Description", self.rdf_prefix),
        };
        self.out.start_element(&element_name)?;

        match subject {
            Resource::Iri(iri) => {
                let name = format!("{}:about", self.rdf_prefix);
                self.write_iri_attribute(&name, iri)?;
            }
            Resource::BlankNode(b) => {
                if !(self.config.inline_blank_nodes() && sorted.is_inlined(b)) {
                    let name = format!("{}:nodeID", self.rdf_prefix);
                    self.out.write_attribute(&name, sorted.label(b))?;
                }
            }
        }

        for entry in order_predicates(predicates) {
            let (predicate, objects) = entry;
            let values: Vec<&Term> = if *predicate == rdf::type_ {
                let mut values = order_types(objects);
                if let Some(enclosing) = &enclosing {
                    // the element name already states this type
                    if let Some(i) = values
                        .iter()
                        .position(|t| matches!(t, Term::Iri(iri) if iri == enclosing))
                    {
                        values.remove(i);
                    }
                }
                values
            } else {
                objects.iter().collect()
            };
            if values.is_empty() {
                continue;
            }
            self.write_predicate(predicate, &values)?;
        }

        self.out.end_element()?;
        Ok(())
    }

    /// The `rdf:type` value used as the enclosing element name, if any:
    /// the first preferred type present, else the single type, provided it
    /// resolves to a QName. `owl:Thing` never names the element when other
    /// types exist.
    fn choose_enclosing_type(&mut self, predicates: &[(Iri, Vec<Term>)]) -> Option<Iri> {
        let types: Vec<&Term> = predicates
            .iter()
            .find(|(p, _)| *p == rdf::type_)
            .map(|(_, objects)| objects.iter().collect())
            .unwrap_or_default();
        let mut candidates = types;
        if candidates.len() >= 2 {
            candidates.retain(|t| !matches!(t, Term::Iri(iri) if *iri == owl::Thing));
        }
        for preferred in PREFERRED_RDF_TYPES {
            if candidates
                .iter()
                .any(|t| matches!(t, Term::Iri(iri) if iri.as_str() == *preferred))
            {
                let iri = Iri::new(*preferred);
                if self.resolver.qname(&iri).is_some() {
                    return Some(iri);
                }
            }
        }
        if candidates.len() == 1 {
            if let Term::Iri(iri) = candidates[0] {
                if self.resolver.qname(iri).is_some() {
                    return Some(iri.clone());
                }
            }
        }
        None
    }

    fn write_predicate(&mut self, predicate: &Iri, values: &[&Term]) -> SerializationResult<()> {
        let predicate_name = self.element_name(predicate)?;
        for value in values {
            match value {
                Term::BlankNode(b)
                    if self.config.inline_blank_nodes() && self.sorted.is_inlined(b) =>
                {
                    if let Some(members) = self.sorted.inline_collection(b) {
                        self.out.start_element(&predicate_name)?;
                        let parse_type = format!("{}:parseType", self.rdf_prefix);
                        self.out.write_attribute(&parse_type, "Collection")?;
                        for member in &members {
                            self.write_collection_member(member)?;
                        }
                        self.out.end_element()?;
                    } else {
                        self.out.start_element(&predicate_name)?;
                        self.write_subject(&Resource::BlankNode(b.clone()))?;
                        self.out.end_element()?;
                    }
                }
                Term::BlankNode(b) => {
                    self.out.start_element(&predicate_name)?;
                    let name = format!("{}:nodeID", self.rdf_prefix);
                    self.out.write_attribute(&name, self.sorted.label(b))?;
                    self.out.end_element()?;
                }
                Term::Iri(iri) => {
                    self.out.start_element(&predicate_name)?;
                    let name = format!("{}:resource", self.rdf_prefix);
                    self.write_iri_attribute(&name, iri)?;
                    self.out.end_element()?;
                }
                Term::Literal(literal) => {
                    self.out.start_element(&predicate_name)?;
                    self.write_literal_attributes(literal)?;
                    // leading/trailing whitespace would be lost on the next
                    // parse anyway; trim it so round trips are stable
                    self.out.write_characters(literal.lexical_form().trim())?;
                    self.out.end_element()?;
                }
            }
        }
        Ok(())
    }

    fn write_collection_member(&mut self, member: &Term) -> SerializationResult<()> {
        match member {
            Term::BlankNode(b) => self.write_subject(&Resource::BlankNode(b.clone())),
            Term::Iri(iri) => {
                let description = format!("{}:Description", self.rdf_prefix);
                self.out.start_element(&description)?;
                let name = format!("{}:about", self.rdf_prefix);
                self.write_iri_attribute(&name, iri)?;
                self.out.end_element()?;
                Ok(())
            }
            // the resource-only member filter keeps literals out of inlined
            // collections; this arm only serves defensively-built graphs
            Term::Literal(literal) => {
                let description = format!("{}:Description", self.rdf_prefix);
                self.out.start_element(&description)?;
                self.write_literal_attributes(literal)?;
                self.out.write_characters(literal.lexical_form().trim())?;
                self.out.end_element()?;
                Ok(())
            }
        }
    }

    fn write_literal_attributes(&mut self, literal: &Literal) -> SerializationResult<()> {
        let datatype = literal.datatype().clone();
        // a language tag implies rdf:langString, which is never spelled out
        let emit_datatype = datatype != rdf::langString
            && (matches!(self.config.string_data_type(), StringDataType::Explicit)
                || datatype != xsd::string);
        if emit_datatype {
            let name = format!("{}:datatype", self.rdf_prefix);
            self.write_iri_attribute(&name, &datatype)?;
        }
        if let Some(tag) = literal.language() {
            self.out.write_attribute("xml:lang", tag)?;
        }
        Ok(())
    }

    /// An IRI-valued attribute: entity-reference form when the DTD subset
    /// is enabled and a prefix covers the IRI, the full IRI otherwise.
    fn write_iri_attribute(&mut self, name: &str, iri: &Iri) -> SerializationResult<()> {
        if self.config.use_dtd_subset() {
            if let Some(qname) = self.resolver.qname(iri) {
                if !qname.prefix.is_empty() {
                    self.out.start_attribute(name)?;
                    self.out.attribute_entity_ref(&qname.prefix)?;
                    self.out.attribute_characters(&qname.local_name)?;
                    self.out.end_attribute()?;
                    return Ok(());
                }
            }
        }
        self.out.write_attribute(name, iri.as_str())?;
        Ok(())
    }

    fn element_name(&mut self, iri: &Iri) -> SerializationResult<String> {
        self.resolver
            .qname(iri)
            .map(|q| q.qualified())
            .ok_or_else(|| InputDefect::NotXmlName(iri.as_str().to_string()).into())
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rdfsort_api::ns::rdfs;
    use rdfsort_api::statement::Statement;
    use rdfsort_api::term::BlankNode;

    fn serialize(graph: &Graph, config: SerializerConfig) -> String {
        let mut ser = RdfXmlSerializer::new_stringifier_with_config(config);
        ser.serialize_graph(graph).unwrap();
        ser.as_str().to_string()
    }

    fn ex(local: &str) -> Iri {
        Iri::new(format!("http://ex/{local}"))
    }

    fn base_graph() -> Graph {
        let mut g = Graph::new();
        g.set_prefix("ex", "http://ex/");
        g.set_prefix("owl", "http://www.w3.org/2002/07/owl#");
        g.set_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        g.set_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        g
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new();
        assert_eq!(
            serialize(&g, SerializerConfig::new()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>\n"
        );
    }

    #[test]
    fn typed_subject_element() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        assert_eq!(
            serialize(&g, SerializerConfig::new()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <rdf:RDF xmlns:ex=\"http://ex/\" xmlns:owl=\"http://www.w3.org/2002/07/owl#\" xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\">\n\
             \t<owl:Class rdf:about=\"http://ex/a\"/>\n\
             </rdf:RDF>\n"
        );
    }

    #[test]
    fn untyped_subject_uses_description() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("<rdf:Description rdf:about=\"http://ex/a\">"), "{out}");
        assert!(out.contains("<rdfs:label>x</rdfs:label>"), "{out}");
        assert!(out.contains("</rdf:Description>"), "{out}");
    }

    #[test]
    fn chosen_type_is_not_restated() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(ex("Other"))));
        let out = serialize(&g, SerializerConfig::new());
        // owl:Class is preferred, becomes the element name, and only the
        // other type remains as an explicit rdf:type
        assert!(out.contains("<owl:Class rdf:about=\"http://ex/a\">"), "{out}");
        assert!(out.contains("<rdf:type rdf:resource=\"http://ex/Other\"/>"), "{out}");
        assert!(!out.contains("rdf:resource=\"http://www.w3.org/2002/07/owl#Class\""), "{out}");
    }

    #[test]
    fn owl_thing_is_ignored_for_the_element_name() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Thing))));
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(ex("Custom"))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("<ex:Custom rdf:about=\"http://ex/a\">"), "{out}");
        assert!(out.contains("rdf:resource=\"http://www.w3.org/2002/07/owl#Thing\""), "{out}");
    }

    #[test]
    fn blank_nodes_get_node_ids() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("b"))));
        g.insert(Statement::new(BlankNode::new("b"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("<ex:p rdf:nodeID=\"a1\"/>"), "{out}");
        assert!(out.contains("<rdf:Description rdf:nodeID=\"a1\">"), "{out}");
    }

    #[test]
    fn inline_blank_node() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("b"))));
        g.insert(Statement::new(BlankNode::new("b"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let config = SerializerConfig::new().with_inline_blank_nodes(true);
        assert_eq!(
            serialize(&g, config),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <rdf:RDF xmlns:ex=\"http://ex/\" xmlns:owl=\"http://www.w3.org/2002/07/owl#\" xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:rdfs=\"http://www.w3.org/2000/01/rdf-schema#\">\n\
             \t<rdf:Description rdf:about=\"http://ex/s\">\n\
             \t\t<ex:p>\n\
             \t\t\t<rdf:Description>\n\
             \t\t\t\t<rdfs:label>x</rdfs:label>\n\
             \t\t\t</rdf:Description>\n\
             \t\t</ex:p>\n\
             \t</rdf:Description>\n\
             </rdf:RDF>\n"
        );
    }

    #[test]
    fn inline_collection_uses_parse_type() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("l1"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::first), Term::Iri(ex("x"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::rest), Term::BlankNode(BlankNode::new("l2"))));
        g.insert(Statement::new(BlankNode::new("l2"), Iri::new(rdf::first), Term::Iri(ex("y"))));
        g.insert(Statement::new(BlankNode::new("l2"), Iri::new(rdf::rest), Term::Iri(Iri::new(rdf::nil))));
        let config = SerializerConfig::new().with_inline_blank_nodes(true);
        let out = serialize(&g, config);
        assert!(out.contains("<ex:p rdf:parseType=\"Collection\">"), "{out}");
        assert!(out.contains("<rdf:Description rdf:about=\"http://ex/x\"/>"), "{out}");
        assert!(out.contains("<rdf:Description rdf:about=\"http://ex/y\"/>"), "{out}");
    }

    #[test]
    fn literal_collection_falls_back_to_long_form() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("l1"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::first), Term::Literal(Literal::simple("x"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::rest), Term::Iri(Iri::new(rdf::nil))));
        let config = SerializerConfig::new().with_inline_blank_nodes(true);
        let out = serialize(&g, config);
        assert!(!out.contains("parseType"), "{out}");
        assert!(out.contains("<rdf:first>x</rdf:first>"), "{out}");
        assert!(out.contains("<rdf:rest rdf:resource=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#nil\"/>"), "{out}");
    }

    #[test]
    fn datatype_policy() {
        let mut g = base_graph();
        g.set_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        g.insert(Statement::new(ex("a"), ex("p"), Term::Literal(Literal::typed("v", Iri::new(xsd::string)))));
        g.insert(Statement::new(ex("a"), ex("q"), Term::Literal(Literal::typed("5", Iri::new(xsd::integer)))));
        let implicit = serialize(&g, SerializerConfig::new());
        assert!(implicit.contains("<ex:p>v</ex:p>"), "{implicit}");
        assert!(
            implicit.contains("<ex:q rdf:datatype=\"http://www.w3.org/2001/XMLSchema#integer\">5</ex:q>"),
            "{implicit}"
        );
        let explicit = serialize(
            &g,
            SerializerConfig::new().with_string_data_type(StringDataType::Explicit),
        );
        assert!(
            explicit.contains("<ex:p rdf:datatype=\"http://www.w3.org/2001/XMLSchema#string\">v</ex:p>"),
            "{explicit}"
        );
    }

    #[test]
    fn language_tags_become_xml_lang() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::lang("colour", "en-gb"))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("<rdfs:label xml:lang=\"en-GB\">colour</rdfs:label>"), "{out}");
    }

    #[test]
    fn literal_text_is_trimmed() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("  padded  "))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("<rdfs:label>padded</rdfs:label>"), "{out}");
    }

    #[test]
    fn generated_prefixes_cover_unknown_namespaces() {
        let mut g = Graph::new();
        g.insert(Statement::new(
            Iri::new("http://one.example/s"),
            Iri::new("http://two.example/ns#p"),
            Term::Literal(Literal::simple("x")),
        ));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("xmlns:ns1=\"http://two.example/ns#\""), "{out}");
        assert!(out.contains("<ns1:p>x</ns1:p>"), "{out}");
    }

    #[test]
    fn dtd_subset_and_entity_references() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        let config = SerializerConfig::new().with_use_dtd_subset(true);
        let out = serialize(&g, config);
        assert!(out.contains("<!DOCTYPE rdf:RDF ["), "{out}");
        assert!(out.contains("<!ENTITY ex \"http://ex/\">"), "{out}");
        assert!(out.contains("<owl:Class rdf:about=\"&ex;a\"/>"), "{out}");
    }

    #[test]
    fn base_iri_lands_on_the_root() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        let config = SerializerConfig::new().with_base_iri(Iri::new("http://ex/"));
        let out = serialize(&g, config);
        assert!(out.contains("<rdf:RDF xml:base=\"http://ex/\""), "{out}");
    }

    #[test]
    fn ontologies_render_first() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("C"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        g.insert(Statement::new(ex("O"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Ontology))));
        let out = serialize(&g, SerializerConfig::new());
        let o = out.find("<owl:Ontology rdf:about=\"http://ex/O\"/>").unwrap();
        let c = out.find("<owl:Class rdf:about=\"http://ex/C\"/>").unwrap();
        assert!(o < c);
    }

    #[test]
    fn comment_banners() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        let config = SerializerConfig::new().with_leading_comments(["generated -- do not edit"]);
        let out = serialize(&g, config);
        assert!(out.contains("## generated &#x2D;&#x2D; do not edit"), "{out}");
        assert!(out.contains("####"), "{out}");
    }

    #[test]
    fn determinism_under_permutation() {
        let statements = [
            Statement::new(ex("b"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))),
            Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))),
            Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))),
        ];
        let build = |order: &[usize]| {
            let mut g = base_graph();
            for &i in order {
                g.insert(statements[i].clone());
            }
            serialize(&g, SerializerConfig::new())
        };
        let reference = build(&[0, 1, 2]);
        assert_eq!(reference, build(&[2, 0, 1]));
        assert_eq!(reference, build(&[1, 2, 0]));
    }
}
