//! Standard namespaces known to the sorted writers.
//!
//! This module provides:
//! * the [`namespace!`](crate::namespace) macro, defining a module of
//!   `&'static str` IRI constants;
//! * modules for the namespaces the engine itself needs to recognize
//!   (`rdf`, `rdfs`, `owl`, `xsd`, and the reserved `xml` namespace).
//!
//! The engine compares IRIs by their string form, so plain string constants
//! are all that is needed here; [`crate::term::Iri`] values are built from
//! them where a term is required.

/// Define a module's worth of IRI constants for one namespace.
///
/// Every identifier is turned into a constant whose value is the namespace
/// IRI followed by the identifier itself. Identifiers that collide with Rust
/// keywords are listed after a `;` together with the local name to use
/// (e.g. `type_, "type"`).
#[macro_export]
macro_rules! namespace {
    ($iri:literal, $($term:ident),* $(,)?) => {
        /// The namespace IRI itself.
        pub const NS: &str = $iri;
        $(
            pub const $term: &str = concat!($iri, stringify!($term));
        )*
    };
    ($iri:literal, $($term:ident),* ; $($alias:ident, $name:literal),* $(,)?) => {
        /// The namespace IRI itself.
        pub const NS: &str = $iri;
        $(
            pub const $term: &str = concat!($iri, stringify!($term));
        )*
        $(
            pub const $alias: &str = concat!($iri, $name);
        )*
    };
}

/// The standard `rdf:` namespace.
///
/// NB: since `type` is a reserved keyword in Rust,
/// the term `rdf:type` spells `rdf::type_` (with a trailing underscore).
pub mod rdf {
    #![allow(non_upper_case_globals)]
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        // datatypes
        langString,
        // collection vocabulary
        first,
        rest,
        nil,
        // core syntax terms
        RDF,
        Description,
        about,
        resource,
        nodeID,
        datatype,
        parseType;
        type_, "type"
    );
}

/// The standard `rdfs:` namespace.
pub mod rdfs {
    #![allow(non_upper_case_globals)]
    namespace!(
        "http://www.w3.org/2000/01/rdf-schema#",
        subClassOf,
        subPropertyOf,
        domain,
        range,
        label,
        comment,
    );
}

/// The standard `owl:` namespace.
pub mod owl {
    #![allow(non_upper_case_globals)]
    namespace!(
        "http://www.w3.org/2002/07/owl#",
        Ontology,
        Class,
        ObjectProperty,
        DatatypeProperty,
        AnnotationProperty,
        NamedIndividual,
        Thing,
        equivalentClass,
        equivalentProperty,
        imports,
    );
}

/// The standard `xsd:` namespace (only the datatypes the engine treats
/// specially; any other datatype IRI is carried through untouched).
pub mod xsd {
    #![allow(non_upper_case_globals)]
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        string,
        boolean,
        integer,
        decimal,
        double,
    );
}

/// The reserved `xml:` namespace (`xml:lang`, `xml:base`).
/// It is never declared explicitly in output.
pub mod xml {
    pub const NS: &str = "http://www.w3.org/XML/1998/namespace";
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
