//! This crate is part of [rdfsort],
//! a canonical, byte-stable RDF serializer
//! designed for keeping ontology sources under line-oriented version control.
//!
//! It implements the ordering engine shared by every format writer:
//! the [canonical comparison](cmp) of terms and statements,
//! [collection detection](collection),
//! the [sorted graph index](index) with blank-node relabeling,
//! and [namespace/QName resolution](resolver).
//!
//! [rdfsort]: https://docs.rs/rdfsort/latest/rdfsort/

pub mod cmp;
pub mod collection;
pub mod index;
pub mod resolver;

pub use cmp::{order_predicates, order_types, ComparisonContext, FIRST_PREDICATES, PREFERRED_RDF_TYPES};
pub use collection::MemberFilter;
pub use index::{SortedGraph, SortedSubject, TripleMap};
pub use resolver::{NamespaceResolver, QName};
