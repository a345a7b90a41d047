//! Sorted pretty-printing for Turtle.
//!
//! The body is rendered before the header, into a buffer: rendering is what
//! decides which prefixes are actually used, and the header only declares
//! those. The buffer is then spliced after the header, so the output stays
//! a single deterministic pass over the sorted index.

use std::io::{self, Write};

use rdfsort_api::config::{SerializerConfig, ShortIriPriority, StringDataType};
use rdfsort_api::error::SerializationResult;
use rdfsort_api::graph::Graph;
use rdfsort_api::ns::{rdf, xsd};
use rdfsort_api::term::{BlankNode, Iri, Literal, Resource, Term};
use rdfsort_order::{order_predicates, order_types, MemberFilter, NamespaceResolver, SortedGraph};

use super::_common::{long_quoted_string, quoted_string, PN_LOCAL};

pub(crate) fn write_graph<W: io::Write>(
    write: &mut W,
    graph: &Graph,
    config: &SerializerConfig,
) -> SerializationResult<()> {
    let sorted = SortedGraph::build(graph, config, MemberFilter::AnyTerm)?;
    let mut resolver = NamespaceResolver::new(graph.prefixes(), false);

    let mut body: Vec<u8> = Vec::new();
    {
        let mut p = Prettifier {
            write: &mut body,
            sorted: &sorted,
            resolver: &mut resolver,
            config,
        };
        p.write_body()?;
    }
    write_header(write, &sorted, &resolver, config, !body.is_empty())?;
    write.write_all(&body)?;
    write_trailing_comments(write, config, !body.is_empty())?;
    Ok(())
}

fn write_header<W: io::Write>(
    w: &mut W,
    sorted: &SortedGraph,
    resolver: &NamespaceResolver,
    config: &SerializerConfig,
    has_body: bool,
) -> io::Result<()> {
    let le = config.line_end();
    let mut wrote = false;
    for comment in config.leading_comments() {
        write!(w, "# {comment}{le}")?;
        wrote = true;
    }
    if let Some(base) = sorted.base_iri() {
        write!(w, "@base <{}> .{le}", base.as_str())?;
        wrote = true;
    }
    for (prefix, namespace) in resolver.used_declarations() {
        write!(w, "@prefix {prefix}: <{namespace}> .{le}")?;
        wrote = true;
    }
    if wrote && has_body {
        w.write_all(le.as_bytes())?;
    }
    Ok(())
}

fn write_trailing_comments<W: io::Write>(
    w: &mut W,
    config: &SerializerConfig,
    has_body: bool,
) -> io::Result<()> {
    if config.trailing_comments().is_empty() {
        return Ok(());
    }
    let le = config.line_end();
    if has_body {
        w.write_all(le.as_bytes())?;
    }
    for comment in config.trailing_comments() {
        write!(w, "# {comment}{le}")?;
    }
    Ok(())
}

struct Prettifier<'a, W> {
    write: &'a mut W,
    sorted: &'a SortedGraph,
    resolver: &'a mut NamespaceResolver,
    config: &'a SerializerConfig,
}

impl<W: Write> Prettifier<'_, W> {
    fn write_body(&mut self) -> io::Result<()> {
        let sorted = self.sorted;
        let subjects = sorted.emission_subjects();
        for (i, subject) in subjects.into_iter().enumerate() {
            if i > 0 {
                self.write.write_all(self.config.line_end().as_bytes())?;
            }
            self.write_subject(subject)?;
        }
        Ok(())
    }

    fn write_subject(&mut self, subject: &Resource) -> io::Result<()> {
        match subject {
            Resource::Iri(iri) => self.write_iri(iri)?,
            Resource::BlankNode(b) => write!(self.write, "_:{}", self.sorted.label(b))?,
        }
        self.write.write_all(self.config.line_end().as_bytes())?;
        let sorted = self.sorted;
        let Some(predicates) = sorted.predicates_of(subject) else {
            return Ok(());
        };
        let entries = order_predicates(predicates);
        let count = entries.len();
        for (i, entry) in entries.into_iter().enumerate() {
            let (predicate, objects) = entry;
            self.write_indent(1)?;
            self.write_predicate_token(predicate)?;
            self.write.write_all(b" ")?;
            self.write_objects(predicate, objects, 1)?;
            let terminator = if i + 1 == count { " ." } else { " ;" };
            self.write.write_all(terminator.as_bytes())?;
            self.write.write_all(self.config.line_end().as_bytes())?;
        }
        Ok(())
    }

    fn write_predicate_token(&mut self, predicate: &Iri) -> io::Result<()> {
        if *predicate == rdf::type_ {
            self.write.write_all(b"a")
        } else {
            self.write_iri(predicate)
        }
    }

    fn write_objects(&mut self, predicate: &Iri, objects: &[Term], depth: usize) -> io::Result<()> {
        let ordered: Vec<&Term> = if *predicate == rdf::type_ {
            order_types(objects)
        } else {
            objects.iter().collect()
        };
        for (i, object) in ordered.into_iter().enumerate() {
            if i > 0 {
                self.write.write_all(b", ")?;
            }
            self.write_object(object, depth)?;
        }
        Ok(())
    }

    fn write_object(&mut self, object: &Term, depth: usize) -> io::Result<()> {
        match object {
            Term::Iri(iri) if self.config.inline_blank_nodes() && *iri == rdf::nil => {
                self.write.write_all(b"()")
            }
            Term::Iri(iri) => self.write_iri(iri),
            Term::Literal(literal) => self.write_literal(literal),
            Term::BlankNode(b) => {
                if self.sorted.is_inlined(b) {
                    if let Some(members) = self.sorted.inline_collection(b) {
                        self.write_collection(&members, depth)
                    } else {
                        self.write_anonymous(b, depth)
                    }
                } else {
                    write!(self.write, "_:{}", self.sorted.label(b))
                }
            }
        }
    }

    fn write_collection(&mut self, members: &[Term], depth: usize) -> io::Result<()> {
        self.write.write_all(b"( ")?;
        for member in members {
            self.write_object(member, depth)?;
            self.write.write_all(b" ")?;
        }
        self.write.write_all(b")")
    }

    fn write_anonymous(&mut self, node: &BlankNode, depth: usize) -> io::Result<()> {
        let sorted = self.sorted;
        let Some(predicates) = sorted.predicates_of(&Resource::BlankNode(node.clone())) else {
            return self.write.write_all(b"[]");
        };
        let entries = order_predicates(predicates);
        let count = entries.len();
        self.write.write_all(b"[")?;
        self.write.write_all(self.config.line_end().as_bytes())?;
        for (i, entry) in entries.into_iter().enumerate() {
            let (predicate, objects) = entry;
            self.write_indent(depth + 1)?;
            self.write_predicate_token(predicate)?;
            self.write.write_all(b" ")?;
            self.write_objects(predicate, objects, depth + 1)?;
            if i + 1 < count {
                self.write.write_all(b" ;")?;
            }
            self.write.write_all(self.config.line_end().as_bytes())?;
        }
        self.write_indent(depth)?;
        self.write.write_all(b"]")
    }

    fn write_iri(&mut self, iri: &Iri) -> io::Result<()> {
        let relative = self.base_relative(iri);
        match self.config.short_iri_priority() {
            ShortIriPriority::Prefix => {
                if self.write_qname(iri)? {
                    return Ok(());
                }
                if let Some(rel) = relative {
                    return write!(self.write, "<{rel}>");
                }
            }
            ShortIriPriority::BaseIri => {
                if let Some(rel) = relative {
                    return write!(self.write, "<{rel}>");
                }
                if self.write_qname(iri)? {
                    return Ok(());
                }
            }
        }
        write!(self.write, "<{}>", iri.as_str())
    }

    /// Render `iri` as `prefix:local` when the prefix table covers it and
    /// the local part is legal; returns whether anything was written.
    fn write_qname(&mut self, iri: &Iri) -> io::Result<bool> {
        let local = iri.local_name();
        if !local.is_empty() && !PN_LOCAL.is_match(local) {
            return Ok(false);
        }
        let namespace = iri.namespace();
        let Some(prefix) = self.resolver.prefix_for(namespace) else {
            return Ok(false);
        };
        let prefix = prefix.to_string();
        self.resolver.mark_used(namespace);
        write!(self.write, "{prefix}:{local}")?;
        Ok(true)
    }

    fn base_relative(&self, iri: &Iri) -> Option<String> {
        let base = self.sorted.base_iri()?;
        let rest = iri.as_str().strip_prefix(base.as_str())?;
        if rest.is_empty() {
            return Some(String::new());
        }
        let tail = rest.strip_prefix('#').unwrap_or(rest);
        if tail.contains(':') || tail.contains('/') || tail.contains('#') {
            return None;
        }
        Some(rest.to_string())
    }

    fn write_literal(&mut self, literal: &Literal) -> io::Result<()> {
        let lex = literal.lexical_form();
        if lex.contains('\n') || lex.contains('\r') {
            self.write.write_all(b"\"\"\"")?;
            long_quoted_string(self.write, lex)?;
            self.write.write_all(b"\"\"\"")?;
        } else {
            self.write.write_all(b"\"")?;
            quoted_string(self.write, lex)?;
            self.write.write_all(b"\"")?;
        }
        if let Some(tag) = literal.language() {
            return write!(self.write, "@{tag}");
        }
        let datatype = literal.datatype().clone();
        let implicit = datatype == xsd::string
            && matches!(self.config.string_data_type(), StringDataType::Implicit);
        if implicit || datatype == rdf::langString {
            return Ok(());
        }
        self.write.write_all(b"^^")?;
        self.write_iri(&datatype)
    }

    fn write_indent(&mut self, depth: usize) -> io::Result<()> {
        for _ in 0..depth {
            self.write.write_all(self.config.indent().as_bytes())?;
        }
        Ok(())
    }
}
