//! An indenting XML event emitter.
//!
//! Writes markup directly to the sink (escaping through
//! [`quick_xml::escape`]) and owns the layout policy the RDF/XML writer
//! needs:
//!
//! * a start tag is held back until the next event decides between
//!   `<e>…</e>` and the self-closing `<e/>`;
//! * an element whose content was child elements closes on its own line at
//!   the current indent, one whose content was text closes on the same line;
//! * attribute values can be written one-shot (escaped) or assembled from
//!   escaped text and raw entity references through the split API
//!   ([`start_attribute`](XmlStreamWriter::start_attribute) /
//!   [`attribute_entity_ref`](XmlStreamWriter::attribute_entity_ref) /
//!   [`attribute_characters`](XmlStreamWriter::attribute_characters) /
//!   [`end_attribute`](XmlStreamWriter::end_attribute));
//! * indent unit and line end are configurable.

use std::io::{self, Write};

use quick_xml::escape::escape;

struct OpenElement {
    name: String,
    has_children: bool,
    has_text: bool,
}

/// A start tag not yet committed to the sink. Attribute values are stored
/// already escaped (or deliberately raw, for entity references).
struct PendingTag {
    name: String,
    attributes: Vec<(String, String)>,
}

/// Indenting XML stream writer.
pub struct XmlStreamWriter<W: Write> {
    write: W,
    indent: String,
    line_end: String,
    initial_depth: usize,
    stack: Vec<OpenElement>,
    pending: Option<PendingTag>,
    pending_attribute: Option<(String, String)>,
    at_line_start: bool,
}

impl<W: Write> XmlStreamWriter<W> {
    /// A writer for a whole document.
    pub fn new(write: W, indent: &str, line_end: &str) -> Self {
        XmlStreamWriter {
            write,
            indent: indent.to_string(),
            line_end: line_end.to_string(),
            initial_depth: 0,
            stack: Vec::new(),
            pending: None,
            pending_attribute: None,
            at_line_start: true,
        }
    }

    /// A writer for a document fragment starting at the given element depth
    /// (every element begins on a fresh line).
    pub fn fragment(write: W, indent: &str, line_end: &str, depth: usize) -> Self {
        XmlStreamWriter {
            write,
            indent: indent.to_string(),
            line_end: line_end.to_string(),
            initial_depth: depth,
            stack: Vec::new(),
            pending: None,
            pending_attribute: None,
            at_line_start: false,
        }
    }

    /// `<?xml version="1.0" encoding="UTF-8"?>` and a line break.
    pub fn write_declaration(&mut self) -> io::Result<()> {
        self.write
            .write_all(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        let line_end = self.line_end.clone();
        self.write.write_all(line_end.as_bytes())?;
        self.at_line_start = true;
        Ok(())
    }

    /// `<!DOCTYPE root [ <!ENTITY …> … ]>` and a line break.
    pub fn write_dtd(&mut self, root: &str, entities: &[(&str, &str)]) -> io::Result<()> {
        let mut dtd = String::new();
        dtd.push_str("<!DOCTYPE ");
        dtd.push_str(root);
        dtd.push_str(" [");
        for (name, value) in entities {
            dtd.push_str(&self.line_end);
            dtd.push_str(&self.indent);
            dtd.push_str("<!ENTITY ");
            dtd.push_str(name);
            dtd.push_str(" \"");
            dtd.push_str(&escape(*value));
            dtd.push_str("\">");
        }
        dtd.push_str(&self.line_end);
        dtd.push_str("]>");
        dtd.push_str(&self.line_end);
        self.write.write_all(dtd.as_bytes())?;
        self.at_line_start = true;
        Ok(())
    }

    /// Open an element. The tag stays pending until the next event decides
    /// whether it is self-closing.
    pub fn start_element(&mut self, name: &str) -> io::Result<()> {
        self.flush_pending()?;
        if let Some(parent) = self.stack.last_mut() {
            parent.has_children = true;
        }
        self.write_line_break_and_indent()?;
        self.pending = Some(PendingTag {
            name: name.to_string(),
            attributes: Vec::new(),
        });
        self.stack.push(OpenElement {
            name: name.to_string(),
            has_children: false,
            has_text: false,
        });
        self.at_line_start = false;
        Ok(())
    }

    /// Close the innermost element: self-closing when it had no content, on
    /// the same line when its content was text, on its own line otherwise.
    pub fn end_element(&mut self) -> io::Result<()> {
        let state = self
            .stack
            .pop()
            .ok_or_else(|| misuse("end_element without a matching start_element"))?;
        if let Some(tag) = self.pending.take() {
            self.write_tag(&tag, true)?;
        } else {
            if state.has_children {
                if !self.at_line_start {
                    let line_end = self.line_end.clone();
                    self.write.write_all(line_end.as_bytes())?;
                }
                let prefix = self.indent.repeat(self.initial_depth + self.stack.len());
                self.write.write_all(prefix.as_bytes())?;
            }
            write!(self.write, "</{}>", state.name)?;
        }
        self.at_line_start = false;
        Ok(())
    }

    /// One-shot attribute on the pending start tag; the value is escaped.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> io::Result<()> {
        let escaped = escape(value).into_owned();
        let tag = self
            .pending
            .as_mut()
            .ok_or_else(|| misuse("attribute written outside of a start tag"))?;
        tag.attributes.push((name.to_string(), escaped));
        Ok(())
    }

    /// Begin an attribute whose value mixes entity references and text.
    pub fn start_attribute(&mut self, name: &str) -> io::Result<()> {
        if self.pending.is_none() {
            return Err(misuse("attribute written outside of a start tag"));
        }
        if self.pending_attribute.is_some() {
            return Err(misuse("attribute already in progress"));
        }
        self.pending_attribute = Some((name.to_string(), String::new()));
        Ok(())
    }

    /// Append `&name;` verbatim to the attribute in progress.
    pub fn attribute_entity_ref(&mut self, name: &str) -> io::Result<()> {
        let (_, value) = self
            .pending_attribute
            .as_mut()
            .ok_or_else(|| misuse("no attribute in progress"))?;
        value.push('&');
        value.push_str(name);
        value.push(';');
        Ok(())
    }

    /// Append escaped text to the attribute in progress.
    pub fn attribute_characters(&mut self, text: &str) -> io::Result<()> {
        let escaped = escape(text).into_owned();
        let (_, value) = self
            .pending_attribute
            .as_mut()
            .ok_or_else(|| misuse("no attribute in progress"))?;
        value.push_str(&escaped);
        Ok(())
    }

    /// Finish the attribute in progress and push it onto the pending tag.
    pub fn end_attribute(&mut self) -> io::Result<()> {
        let (name, value) = self
            .pending_attribute
            .take()
            .ok_or_else(|| misuse("no attribute in progress"))?;
        let tag = self
            .pending
            .as_mut()
            .ok_or_else(|| misuse("attribute written outside of a start tag"))?;
        tag.attributes.push((name, value));
        Ok(())
    }

    /// Text content (escaped). Marks the innermost element as text-bearing,
    /// so its end tag stays on the same line.
    pub fn write_characters(&mut self, text: &str) -> io::Result<()> {
        self.flush_pending()?;
        if let Some(top) = self.stack.last_mut() {
            top.has_text = true;
        }
        let escaped = escape(text).into_owned();
        self.write.write_all(escaped.as_bytes())?;
        self.at_line_start = false;
        Ok(())
    }

    /// An XML comment; the content is written verbatim and must already be
    /// comment-safe.
    pub fn write_comment(&mut self, content: &str) -> io::Result<()> {
        self.flush_pending()?;
        if let Some(top) = self.stack.last_mut() {
            top.has_children = true;
        }
        self.write_line_break_and_indent()?;
        write!(self.write, "<!--{content}-->")?;
        self.at_line_start = false;
        Ok(())
    }

    /// A bare line break.
    pub fn write_eol(&mut self) -> io::Result<()> {
        self.flush_pending()?;
        let line_end = self.line_end.clone();
        self.write.write_all(line_end.as_bytes())?;
        self.at_line_start = true;
        Ok(())
    }

    /// Splice pre-rendered bytes (a fragment produced by another
    /// [`XmlStreamWriter`]) into the stream.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.flush_pending()?;
        if let Some(top) = self.stack.last_mut() {
            top.has_children = true;
        }
        self.write.write_all(bytes)?;
        self.at_line_start = false;
        Ok(())
    }

    /// Finish writing and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_pending()?;
        Ok(self.write)
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        if let Some(tag) = self.pending.take() {
            self.write_tag(&tag, false)?;
        }
        Ok(())
    }

    fn write_tag(&mut self, tag: &PendingTag, self_closing: bool) -> io::Result<()> {
        write!(self.write, "<{}", tag.name)?;
        for (name, value) in &tag.attributes {
            write!(self.write, " {name}=\"{value}\"")?;
        }
        if self_closing {
            self.write.write_all(b"/>")
        } else {
            self.write.write_all(b">")
        }
    }

    fn write_line_break_and_indent(&mut self) -> io::Result<()> {
        let mut prefix = String::new();
        if !self.at_line_start {
            prefix.push_str(&self.line_end);
        }
        prefix.push_str(&self.indent.repeat(self.initial_depth + self.stack.len()));
        self.write.write_all(prefix.as_bytes())
    }
}

fn misuse(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
