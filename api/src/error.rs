//! Error taxonomy of the serialization engine.
//!
//! Every failure surfaces as a single [`SerializationError`] at the engine's
//! boundary; intermediate stages never swallow errors. The sorted/unsorted
//! size anomaly is deliberately *not* here: it is a non-fatal diagnostic
//! reported through `tracing`.

use std::io;

use thiserror::Error;

pub type SerializationResult<T> = Result<T, SerializationError>;

/// Any failure of a serialization run.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The input graph cannot be rendered with the requested options.
    #[error("input defect: {0}")]
    InputDefect(#[from] InputDefect),

    /// The configuration record is invalid. Raised before any output byte.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The output sink failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl SerializationError {
    /// The process exit code an outer command-line tool should report:
    /// 1 for I/O and serialization failures, 2 for configuration errors
    /// (0 being success, which has no error value).
    pub fn exit_code(&self) -> i32 {
        match self {
            SerializationError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// A defect of the input graph, fatal before any output byte.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputDefect {
    /// A relative IRI cannot survive a round trip.
    #[error("IRI <{0}> is not absolute")]
    UnresolvableIri(String),

    /// Inline rendering requires the blank-node graph to be acyclic.
    #[error("blank node _:{0} is part of a cycle, which cannot be inlined")]
    BlankNodeCycle(String),

    /// Inline rendering has no place to put a blank-node subject that no
    /// statement references as an object.
    #[error("blank node subject _:{0} is never used as an object, so it cannot be inlined")]
    UnreferencedBlankNodeSubject(String),

    /// RDF/XML can only express predicates (and typed-element names) whose
    /// local name is a legal XML name.
    #[error("IRI <{0}> cannot be written as an XML qualified name")]
    NotXmlName(String),
}

/// An invalid configuration record, fatal before any output byte.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("indent must contain only whitespace, got {0:?}")]
    InvalidIndent(String),

    #[error("unsupported line end {0:?}")]
    InvalidLineEnd(String),

    #[error("invalid language tag {0:?}")]
    InvalidLanguageTag(String),

    #[error("base IRI must be absolute, got {0:?}")]
    InvalidBaseIri(String),
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
