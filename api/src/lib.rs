//! This crate is part of [rdfsort],
//! a canonical, byte-stable RDF serializer
//! designed for keeping ontology sources under line-oriented version control.
//!
//! It provides the core types shared by every other crate of the workspace:
//! the [term model](term), [statements](statement), [graphs](graph),
//! [prefix tables](prefix), the common [namespaces](ns),
//! the serializer [configuration record](config)
//! and the [error taxonomy](error).
//!
//! [rdfsort]: https://docs.rs/rdfsort/latest/rdfsort/

pub mod config;
pub mod error;
pub mod graph;
pub mod ns;
pub mod prefix;
pub mod statement;
pub mod term;

/// Define a lazily-compiled [`regex::Regex`] static.
///
/// The pattern is compiled on first use; an invalid pattern is a programming
/// error and panics at that point.
#[macro_export]
macro_rules! lazy_regex {
    ($(#[$attr:meta])* $name:ident = $re:expr) => {
        ::lazy_static::lazy_static! {
            $(#[$attr])*
            static ref $name: ::regex::Regex =
                ::regex::Regex::new($re).unwrap();
        }
    };
    ($(#[$attr:meta])* pub $name:ident = $re:expr) => {
        ::lazy_static::lazy_static! {
            $(#[$attr])*
            pub static ref $name: ::regex::Regex =
                ::regex::Regex::new($re).unwrap();
        }
    };
    ($(#[$attr:meta])* pub($($vis:tt)+) $name:ident = $re:expr) => {
        ::lazy_static::lazy_static! {
            $(#[$attr])*
            pub($($vis)+) static ref $name: ::regex::Regex =
                ::regex::Regex::new($re).unwrap();
        }
    };
}
