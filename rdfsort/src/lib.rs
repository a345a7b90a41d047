//! A canonical, byte-stable RDF serializer.
//!
//! `rdfsort` turns a fully-materialized RDF graph into a deterministic
//! textual serialization — Turtle or RDF/XML — suitable for line-oriented
//! version control: two semantically equivalent graphs produce identical
//! output bytes regardless of statement insertion order, blank-node
//! identifier assignment, or prior serialization history.
//!
//! # Example
//!
//! ```
//! use rdfsort::{serialize_to_string, Graph, Iri, SerializerConfig, Statement, Term};
//!
//! let mut graph = Graph::new();
//! graph.set_prefix("ex", "http://example.org/");
//! graph.set_prefix("owl", "http://www.w3.org/2002/07/owl#");
//! graph.insert(Statement::new(
//!     Iri::new("http://example.org/Thing"),
//!     Iri::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!     Term::Iri(Iri::new("http://www.w3.org/2002/07/owl#Class")),
//! ));
//!
//! let turtle = serialize_to_string(&graph, &SerializerConfig::new()).unwrap();
//! assert_eq!(
//!     turtle,
//!     "@prefix ex: <http://example.org/> .\n\
//!      @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      \n\
//!      ex:Thing\n\
//!      \ta owl:Class .\n"
//! );
//! ```
//!
//! The crates of the workspace split the work the obvious way:
//! [`rdfsort-api`](rdfsort_api) carries the model and configuration,
//! [`rdfsort-order`](rdfsort_order) the canonical ordering engine,
//! [`rdfsort-turtle`](rdfsort_turtle) and [`rdfsort-xml`](rdfsort_xml)
//! the format writers. This crate re-exports the lot and adds the
//! [`serialize`] dispatcher.

use std::io;

pub use rdfsort_api::config::{
    SerializerConfig, ShortIriPriority, StringDataType, TargetFormat,
};
pub use rdfsort_api::error::{
    ConfigError, InputDefect, SerializationError, SerializationResult,
};
pub use rdfsort_api::graph::Graph;
pub use rdfsort_api::ns;
pub use rdfsort_api::prefix::PrefixMap;
pub use rdfsort_api::statement::Statement;
pub use rdfsort_api::term::{BlankNode, Iri, Literal, Resource, Term};
pub use rdfsort_order::{ComparisonContext, SortedGraph};
pub use rdfsort_turtle::TurtleSerializer;
pub use rdfsort_xml::RdfXmlSerializer;

/// Serialize `graph` to `write` in the configuration's target format,
/// returning the writer on success.
pub fn serialize<W: io::Write>(
    graph: &Graph,
    config: &SerializerConfig,
    write: W,
) -> SerializationResult<W> {
    match config.target_format() {
        TargetFormat::Turtle => {
            let mut serializer = TurtleSerializer::new_with_config(write, config.clone());
            serializer.serialize_graph(graph)?;
            Ok(serializer.into_inner())
        }
        TargetFormat::RdfXml => {
            let mut serializer = RdfXmlSerializer::new_with_config(write, config.clone());
            serializer.serialize_graph(graph)?;
            Ok(serializer.into_inner())
        }
    }
}

/// Serialize `graph` to a `String` in the configuration's target format.
pub fn serialize_to_string(graph: &Graph, config: &SerializerConfig) -> SerializationResult<String> {
    let bytes = serialize(graph, config, Vec::new())?;
    String::from_utf8(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
