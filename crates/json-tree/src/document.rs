//! Loading and saving documents, and free-text literal parsing.
//!
//! The loader accepts the standard JSON grammar and keeps object key order;
//! the serializer renders with configurable indentation (two spaces unless
//! told otherwise) in the same order.

use std::fmt;

use serde::Serialize;
use serde_json::error::Category;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::node::Node;

/// Default indentation width of the serializer.
pub const DEFAULT_INDENT: usize = 2;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Malformed JSON.
    Syntax,
    /// Input ended in the middle of a value.
    Eof,
    /// Well-formed but unrepresentable, e.g. a number out of range.
    Data,
    Io,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadErrorKind::Syntax => "syntax",
            LoadErrorKind::Eof => "unexpected end of input",
            LoadErrorKind::Data => "data",
            LoadErrorKind::Io => "io",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        let kind = match e.classify() {
            Category::Syntax => LoadErrorKind::Syntax,
            Category::Eof => LoadErrorKind::Eof,
            Category::Data => LoadErrorKind::Data,
            Category::Io => LoadErrorKind::Io,
        };
        LoadError { kind, line: e.line(), column: e.column(), message: e.to_string() }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("serialized document is not valid UTF-8")]
    Utf8,
}

// ── Document ──────────────────────────────────────────────────────────────

/// A whole JSON document, owned by one edit session at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Parse UTF-8 text into a document.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] with kind, position and message on malformed
    /// input, including trailing garbage after the top-level value.
    ///
    /// ```
    /// use json_tree::Document;
    ///
    /// let doc = Document::parse(r#"{"b": 1, "a": [true, null]}"#).unwrap();
    /// assert_eq!(doc.to_pretty_string().unwrap(), "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}");
    /// assert!(Document::parse("{\"a\": }").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let root: Node = serde_json::from_str(text)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Render with the default two-space indentation.
    pub fn to_pretty_string(&self) -> Result<String, SaveError> {
        self.to_pretty_string_with_indent(DEFAULT_INDENT)
    }

    pub fn to_pretty_string_with_indent(&self, indent: usize) -> Result<String, SaveError> {
        let indent = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|_| SaveError::Utf8)
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

// ── Free-text input ───────────────────────────────────────────────────────

/// Strip newlines from raw user input. Applied to keys and literals alike.
pub fn clean_input(raw: &str) -> String {
    raw.chars().filter(|&c| c != '\n').collect()
}

/// Interpret user-entered text as a value.
///
/// The text (newlines stripped) is tried as a JSON literal first; anything
/// that does not parse is kept verbatim as a string. This never fails.
///
/// ```
/// use json_tree::{parse_literal, Node};
///
/// assert_eq!(parse_literal("42"), Node::from(42));
/// assert_eq!(parse_literal("\"quoted\""), Node::from("quoted"));
/// assert_eq!(parse_literal("not json"), Node::from("not json"));
/// assert_eq!(parse_literal("tr\nue"), Node::from(true));
/// ```
pub fn parse_literal(raw: &str) -> Node {
    let cleaned = clean_input(raw);
    match serde_json::from_str::<Node>(&cleaned) {
        Ok(node) => node,
        Err(_) => Node::String(cleaned),
    }
}
