//! This crate is part of [rdfsort],
//! a canonical, byte-stable RDF serializer
//! designed for keeping ontology sources under line-oriented version control.
//!
//! It provides the sorted [Turtle] writer.
//!
//! [rdfsort]: https://docs.rs/rdfsort/latest/rdfsort/
//! [Turtle]: https://www.w3.org/TR/turtle/

pub mod serializer;

pub use serializer::TurtleSerializer;
