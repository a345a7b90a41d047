//! Serializer for the [Turtle] concrete syntax of RDF.
//!
//! **Important**:
//! the methods in this module accepting a [`Write`]
//! make no effort to minimize the number of write operations.
//! Hence, in most cases, they should be passed a [`BufWriter`].
//!
//! [Turtle]: https://www.w3.org/TR/turtle/
//! [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
//! [`BufWriter`]: https://doc.rust-lang.org/std/io/struct.BufWriter.html

use std::io;

use rdfsort_api::config::SerializerConfig;
use rdfsort_api::error::SerializationResult;
use rdfsort_api::graph::Graph;

mod _common;
mod _pretty;

/// Turtle serializer over the sorted graph index.
pub struct TurtleSerializer<W> {
    config: SerializerConfig,
    write: W,
}

impl<W> TurtleSerializer<W>
where
    W: io::Write,
{
    /// Build a new Turtle serializer writing to `write`, with the default config.
    #[inline]
    pub fn new(write: W) -> TurtleSerializer<W> {
        Self::new_with_config(write, SerializerConfig::default())
    }

    /// Build a new Turtle serializer writing to `write`, with the given config.
    pub fn new_with_config(write: W, config: SerializerConfig) -> TurtleSerializer<W> {
        TurtleSerializer { config, write }
    }

    /// Borrow this serializer's configuration.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize a whole graph in canonical order.
    pub fn serialize_graph(&mut self, graph: &Graph) -> SerializationResult<&mut Self> {
        self.config.validate()?;
        _pretty::write_graph(&mut self.write, graph, &self.config)?;
        self.write.flush()?;
        Ok(self)
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl TurtleSerializer<Vec<u8>> {
    /// Create a new serializer which targets a `String`.
    #[inline]
    pub fn new_stringifier() -> Self {
        TurtleSerializer::new(Vec::new())
    }

    /// Create a new serializer which targets a `String` with a custom config.
    #[inline]
    pub fn new_stringifier_with_config(config: SerializerConfig) -> Self {
        TurtleSerializer::new_with_config(Vec::new(), config)
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

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rdfsort_api::ns::{owl, rdf, rdfs, xsd};
    use rdfsort_api::statement::Statement;
    use rdfsort_api::term::{BlankNode, Iri, Literal, Term};

    fn serialize(graph: &Graph, config: SerializerConfig) -> String {
        let mut ser = TurtleSerializer::new_stringifier_with_config(config);
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
    fn empty_graph_is_empty_output() {
        let g = Graph::new();
        assert_eq!(serialize(&g, SerializerConfig::new()), "");
    }

    #[test]
    fn empty_graph_with_prefixes_is_still_empty() {
        let mut g = Graph::new();
        g.set_prefix("ex", "http://ex/");
        assert_eq!(serialize(&g, SerializerConfig::new()), "");
    }

    #[test]
    fn single_type_triple() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        assert_eq!(
            serialize(&g, SerializerConfig::new()),
            "@prefix ex: <http://ex/> .\n\
             @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             \n\
             ex:a\n\
             \ta owl:Class .\n"
        );
    }

    #[test]
    fn subjects_in_sorted_order() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("b"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let out = serialize(&g, SerializerConfig::new());
        let a = out.find("ex:a\n").unwrap();
        let b = out.find("ex:b\n").unwrap();
        assert!(a < b);
        // one blank line between subject blocks, one terminator per subject
        assert_eq!(
            out,
            "@prefix ex: <http://ex/> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
             \n\
             ex:a\n\
             \trdfs:label \"x\" .\n\
             \n\
             ex:b\n\
             \trdfs:label \"x\" .\n"
        );
    }

    #[test]
    fn first_predicates_render_before_the_rest() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), ex("p"), Term::Literal(Literal::simple("v"))));
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("l"))));
        g.insert(Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        assert_eq!(
            serialize(&g, SerializerConfig::new()),
            "@prefix ex: <http://ex/> .\n\
             @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
             \n\
             ex:a\n\
             \ta owl:Class ;\n\
             \trdfs:label \"l\" ;\n\
             \tex:p \"v\" .\n"
        );
    }

    #[test]
    fn ontology_subject_renders_first() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("C"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))));
        g.insert(Statement::new(ex("O"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Ontology))));
        let out = serialize(&g, SerializerConfig::new());
        let o = out.find("ex:O\n").unwrap();
        let c = out.find("ex:C\n").unwrap();
        assert!(o < c);
    }

    #[test]
    fn multiple_objects_are_comma_separated() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("b"))));
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("a"))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("\trdfs:label \"a\", \"b\" .\n"), "{out}");
    }

    #[test]
    fn inline_collection() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("l1"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::first), Term::Iri(ex("x"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::rest), Term::BlankNode(BlankNode::new("l2"))));
        g.insert(Statement::new(BlankNode::new("l2"), Iri::new(rdf::first), Term::Iri(ex("y"))));
        g.insert(Statement::new(BlankNode::new("l2"), Iri::new(rdf::rest), Term::Iri(Iri::new(rdf::nil))));
        let config = SerializerConfig::new().with_inline_blank_nodes(true);
        assert_eq!(
            serialize(&g, config),
            "@prefix ex: <http://ex/> .\n\
             \n\
             ex:s\n\
             \tex:p ( ex:x ex:y ) .\n"
        );
    }

    #[test]
    fn collection_in_long_form_without_inlining() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("l1"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::first), Term::Iri(ex("x"))));
        g.insert(Statement::new(BlankNode::new("l1"), Iri::new(rdf::rest), Term::Iri(Iri::new(rdf::nil))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("ex:p _:a1"), "{out}");
        assert!(out.contains("_:a1\n"), "{out}");
        assert!(out.contains("\trdf:first ex:x ;\n"), "{out}");
        assert!(out.contains("\trdf:rest rdf:nil .\n"), "{out}");
    }

    #[test]
    fn inline_blank_node_block() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new("b"))));
        g.insert(Statement::new(BlankNode::new("b"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let config = SerializerConfig::new().with_inline_blank_nodes(true);
        assert_eq!(
            serialize(&g, config),
            "@prefix ex: <http://ex/> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
             \n\
             ex:s\n\
             \tex:p [\n\
             \t\trdfs:label \"x\"\n\
             \t] .\n"
        );
    }

    #[test]
    fn string_datatype_policy() {
        use rdfsort_api::config::StringDataType;
        let mut g = base_graph();
        g.set_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        g.insert(Statement::new(
            ex("a"),
            ex("p"),
            Term::Literal(Literal::typed("value", Iri::new(xsd::string))),
        ));
        let implicit = serialize(&g, SerializerConfig::new());
        assert!(implicit.contains("ex:p \"value\" .\n"), "{implicit}");
        let explicit = serialize(
            &g,
            SerializerConfig::new().with_string_data_type(StringDataType::Explicit),
        );
        assert!(explicit.contains("ex:p \"value\"^^xsd:string .\n"), "{explicit}");
    }

    #[test]
    fn language_tags_are_shaped() {
        let mut g = base_graph();
        g.insert(Statement::new(
            ex("a"),
            Iri::new(rdfs::label),
            Term::Literal(Literal::lang("colour", "en-gb")),
        ));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("\"colour\"@en-GB"), "{out}");
    }

    #[test]
    fn override_string_language() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("plain"))));
        g.insert(Statement::new(ex("a"), ex("p"), Term::Literal(Literal::lang("tagged", "fr"))));
        let config = SerializerConfig::new().with_override_string_language("en");
        let out = serialize(&g, config);
        assert!(out.contains("\"plain\"@en"), "{out}");
        // existing tags are never touched
        assert!(out.contains("\"tagged\"@fr"), "{out}");
    }

    #[test]
    fn multiline_literal_uses_long_quotes() {
        let mut g = base_graph();
        g.insert(Statement::new(
            ex("a"),
            Iri::new(rdfs::comment),
            Term::Literal(Literal::simple("line one\nline two")),
        ));
        let out = serialize(&g, SerializerConfig::new());
        assert!(out.contains("\"\"\"line one\nline two\"\"\""), "{out}");
    }

    #[test]
    fn base_relative_rendering() {
        use rdfsort_api::config::ShortIriPriority;
        let mut g = Graph::new();
        g.insert(Statement::new(
            Iri::new("http://ex/onto#a"),
            Iri::new("http://ex/onto#p"),
            Term::Iri(Iri::new("http://ex/onto#b")),
        ));
        let config = SerializerConfig::new()
            .with_base_iri(Iri::new("http://ex/onto#"))
            .with_short_iri_priority(ShortIriPriority::BaseIri);
        assert_eq!(
            serialize(&g, config),
            "@base <http://ex/onto#> .\n\
             \n\
             <a>\n\
             \t<p> <b> .\n"
        );
    }

    #[test]
    fn prefix_beats_base_by_default() {
        let mut g = Graph::new();
        g.set_prefix("o", "http://ex/onto#");
        g.insert(Statement::new(
            Iri::new("http://ex/onto#a"),
            Iri::new("http://ex/onto#p"),
            Term::Iri(Iri::new("http://ex/onto#b")),
        ));
        let config = SerializerConfig::new().with_base_iri(Iri::new("http://ex/onto#"));
        let out = serialize(&g, config);
        assert!(out.contains("o:a\n"), "{out}");
        assert!(out.contains("\to:p o:b .\n"), "{out}");
    }

    #[test]
    fn unused_prefixes_are_not_declared() {
        let mut g = base_graph();
        g.set_prefix("unused", "http://unused.example/");
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let out = serialize(&g, SerializerConfig::new());
        assert!(!out.contains("unused"), "{out}");
        assert!(!out.contains("@prefix owl:"), "{out}");
    }

    #[test]
    fn comments_surround_the_document() {
        let mut g = base_graph();
        g.insert(Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))));
        let config = SerializerConfig::new()
            .with_leading_comments(["top"])
            .with_trailing_comments(["bottom"]);
        assert_eq!(
            serialize(&g, config),
            "# top\n\
             @prefix ex: <http://ex/> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
             \n\
             ex:a\n\
             \trdfs:label \"x\" .\n\
             \n\
             # bottom\n"
        );
    }

    #[test]
    fn determinism_under_permutation() {
        let statements = [
            Statement::new(ex("b"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))),
            Statement::new(ex("a"), Iri::new(rdfs::label), Term::Literal(Literal::simple("x"))),
            Statement::new(ex("a"), Iri::new(rdf::type_), Term::Iri(Iri::new(owl::Class))),
            Statement::new(ex("b"), Iri::new(rdfs::label), Term::Literal(Literal::simple("y"))),
        ];
        let build = |order: &[usize]| {
            let mut g = base_graph();
            for &i in order {
                g.insert(statements[i].clone());
            }
            serialize(&g, SerializerConfig::new())
        };
        let reference = build(&[0, 1, 2, 3]);
        assert_eq!(reference, build(&[3, 2, 1, 0]));
        assert_eq!(reference, build(&[1, 3, 0, 2]));
    }

    #[test]
    fn blank_node_bijection_invariance() {
        let build = |n1: &str, n2: &str| {
            let mut g = base_graph();
            g.insert(Statement::new(ex("s"), ex("p"), Term::BlankNode(BlankNode::new(n1))));
            g.insert(Statement::new(BlankNode::new(n1), Iri::new(rdfs::label), Term::Literal(Literal::simple("1"))));
            g.insert(Statement::new(ex("s"), ex("q"), Term::BlankNode(BlankNode::new(n2))));
            g.insert(Statement::new(BlankNode::new(n2), Iri::new(rdfs::label), Term::Literal(Literal::simple("2"))));
            serialize(&g, SerializerConfig::new())
        };
        assert_eq!(build("x", "y"), build("y", "x"));
        assert_eq!(build("x", "y"), build("n23", "n5"));
    }
}
