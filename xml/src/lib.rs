//! This crate is part of [rdfsort],
//! a canonical, byte-stable RDF serializer
//! designed for keeping ontology sources under line-oriented version control.
//!
//! It provides the sorted [RDF/XML] writer and the indenting
//! [XML event emitter](stream) underneath it.
//!
//! [rdfsort]: https://docs.rs/rdfsort/latest/rdfsort/
//! [RDF/XML]: https://www.w3.org/TR/rdf-syntax-grammar/

pub mod serializer;
pub mod stream;

pub use serializer::RdfXmlSerializer;
