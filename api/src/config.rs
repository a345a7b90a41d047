//! Configuration record of a serialization run.

use crate::error::ConfigError;
use crate::lazy_regex;
use crate::term::Iri;

/// The concrete syntax to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetFormat {
    #[default]
    Turtle,
    RdfXml,
}

/// Whether the `xsd:string` datatype is spelled out on plain literals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StringDataType {
    /// Omit `xsd:string`; it is implied by RDF 1.1.
    #[default]
    Implicit,
    /// Always write the datatype.
    Explicit,
}

/// When an IRI can be shortened both against the base IRI and through a
/// prefix, which form wins. Only Turtle distinguishes the two; RDF/XML
/// always uses qualified names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShortIriPriority {
    #[default]
    Prefix,
    BaseIri,
}

/// Serializer configuration, builder style.
///
/// The output is a pure function of the graph and this record: two runs with
/// equal inputs produce identical bytes.
#[derive(Clone, Debug)]
pub struct SerializerConfig {
    base_iri: Option<Iri>,
    infer_base_iri: bool,
    indent: String,
    line_end: String,
    inline_blank_nodes: bool,
    use_dtd_subset: bool,
    string_data_type: StringDataType,
    override_string_language: Option<String>,
    short_iri_priority: ShortIriPriority,
    leading_comments: Vec<String>,
    trailing_comments: Vec<String>,
    target_format: TargetFormat,
}

impl SerializerConfig {
    pub fn new() -> Self {
        SerializerConfig {
            base_iri: None,
            infer_base_iri: false,
            indent: "\t".to_string(),
            line_end: "\n".to_string(),
            inline_blank_nodes: false,
            use_dtd_subset: false,
            string_data_type: StringDataType::default(),
            override_string_language: None,
            short_iri_priority: ShortIriPriority::default(),
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            target_format: TargetFormat::default(),
        }
    }

    /// Explicit base IRI for relativization (and `xml:base`).
    pub fn with_base_iri(mut self, base: impl Into<Iri>) -> Self {
        self.base_iri = Some(base.into());
        self
    }

    /// Adopt the first `owl:Ontology` subject (in sorted order) as base IRI
    /// when no explicit base is set.
    pub fn with_infer_base_iri(mut self, b: bool) -> Self {
        self.infer_base_iri = b;
        self
    }

    /// Indent unit; defaults to one tab.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Line terminator; defaults to `\n`.
    pub fn with_line_end(mut self, line_end: impl Into<String>) -> Self {
        self.line_end = line_end.into();
        self
    }

    /// Render blank nodes inline (`[ … ]`, nested elements) where possible.
    pub fn with_inline_blank_nodes(mut self, b: bool) -> Self {
        self.inline_blank_nodes = b;
        self
    }

    /// RDF/XML only: emit a DTD subset and use entity references in
    /// IRI-valued attributes.
    pub fn with_use_dtd_subset(mut self, b: bool) -> Self {
        self.use_dtd_subset = b;
        self
    }

    pub fn with_string_data_type(mut self, policy: StringDataType) -> Self {
        self.string_data_type = policy;
        self
    }

    /// Apply this language tag to every plain `xsd:string` literal.
    /// Literals that already carry a tag are never touched.
    pub fn with_override_string_language(mut self, tag: impl Into<String>) -> Self {
        self.override_string_language = Some(tag.into());
        self
    }

    pub fn with_short_iri_priority(mut self, priority: ShortIriPriority) -> Self {
        self.short_iri_priority = priority;
        self
    }

    /// Comment lines emitted verbatim at the top of the document.
    pub fn with_leading_comments(mut self, comments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.leading_comments = comments.into_iter().map(Into::into).collect();
        self
    }

    /// Comment lines emitted verbatim at the bottom of the document.
    pub fn with_trailing_comments(mut self, comments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.trailing_comments = comments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target_format(mut self, format: TargetFormat) -> Self {
        self.target_format = format;
        self
    }

    pub fn base_iri(&self) -> Option<&Iri> {
        self.base_iri.as_ref()
    }

    pub fn infer_base_iri(&self) -> bool {
        self.infer_base_iri
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn line_end(&self) -> &str {
        &self.line_end
    }

    pub fn inline_blank_nodes(&self) -> bool {
        self.inline_blank_nodes
    }

    pub fn use_dtd_subset(&self) -> bool {
        self.use_dtd_subset
    }

    pub fn string_data_type(&self) -> StringDataType {
        self.string_data_type
    }

    pub fn override_string_language(&self) -> Option<&str> {
        self.override_string_language.as_deref()
    }

    pub fn short_iri_priority(&self) -> ShortIriPriority {
        self.short_iri_priority
    }

    pub fn leading_comments(&self) -> &[String] {
        &self.leading_comments
    }

    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing_comments
    }

    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }

    /// Check the record for values no writer can honor.
    /// Called by every writer before it produces its first byte.
    pub fn validate(&self) -> Result<(), ConfigError> {
        lazy_regex!(LANGUAGE_TAG = r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$");

        if !self.indent.chars().all(char::is_whitespace) {
            return Err(ConfigError::InvalidIndent(self.indent.clone()));
        }
        if !matches!(self.line_end.as_str(), "\n" | "\r\n" | "\r") {
            return Err(ConfigError::InvalidLineEnd(self.line_end.clone()));
        }
        if let Some(tag) = &self.override_string_language {
            if !LANGUAGE_TAG.is_match(tag) {
                return Err(ConfigError::InvalidLanguageTag(tag.clone()));
            }
        }
        if let Some(base) = &self.base_iri {
            if !base.is_absolute() {
                return Err(ConfigError::InvalidBaseIri(base.as_str().to_string()));
            }
        }
        Ok(())
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig::new()
    }
}

// ---------------------------------------------------------------------------------
//                                      tests
// ---------------------------------------------------------------------------------
