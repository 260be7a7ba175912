// HTML text → node tree.
//
// Pipeline: lexer (fragments) → tree builder (forest) → optional document
// reconstruction. The lenient default accepts any input; strict mode reports
// structural errors instead of repairing them.

mod attributes;
mod document;
mod lexer;
mod tree;

use crate::document::HtmlDocument;
use crate::error::HtmlTreeError;
use crate::node::HtmlNode;

/// Parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on mismatched, stray or unclosed tags instead of repairing them.
    pub strict: bool,
    /// Rebuild input that has a doctype or `<html>` root as an
    /// [`HtmlDocument`].
    pub as_document: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_document(mut self, as_document: bool) -> Self {
        self.as_document = as_document;
        self
    }
}

/// Result of parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Nothing but whitespace (or a lone doctype).
    Empty,
    /// Exactly one top-level node.
    Node(HtmlNode),
    /// Several top-level nodes, in source order.
    Forest(Vec<HtmlNode>),
    Document(HtmlDocument),
}

impl Parsed {
    pub fn is_empty(&self) -> bool {
        matches!(self, Parsed::Empty)
    }

    /// Top-level nodes; a document yields its `<html>` root.
    pub fn into_nodes(self) -> Vec<HtmlNode> {
        match self {
            Parsed::Empty => Vec::new(),
            Parsed::Node(node) => vec![node],
            Parsed::Forest(nodes) => nodes,
            Parsed::Document(document) => vec![document.root().clone()],
        }
    }

    /// The single top-level node, if there is exactly one.
    pub fn into_node(self) -> Option<HtmlNode> {
        match self {
            Parsed::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_document(self) -> Option<HtmlDocument> {
        match self {
            Parsed::Document(document) => Some(document),
            _ => None,
        }
    }
}

/// Parse leniently.
///
/// ```
/// use htmltree::{parse, Parsed};
///
/// let parsed = parse("<div><p>Hi</p></div>").unwrap();
/// let Parsed::Node(div) = parsed else { panic!() };
/// assert_eq!(div.to_html(false), "<div><p>Hi</p></div>");
/// ```
///
/// # Errors
///
/// Lenient parsing does not fail; the `Result` matches [`parse_with`].
pub fn parse(html: &str) -> Result<Parsed, HtmlTreeError> {
    parse_with(html, &ParseOptions::default())
}

/// Parse with explicit options.
///
/// # Errors
///
/// In strict mode, returns [`HtmlTreeError::MismatchedClosingTag`],
/// [`HtmlTreeError::UnexpectedClosingTag`] or
/// [`HtmlTreeError::UnclosedElement`] for malformed structure.
pub fn parse_with(html: &str, options: &ParseOptions) -> Result<Parsed, HtmlTreeError> {
    if html.trim().is_empty() {
        return Ok(Parsed::Empty);
    }
    let fragments = lexer::tokenize(html);
    trace!("lexed {} fragments", fragments.len());
    let forest = tree::build(fragments, options.strict)?;

    let mut nodes = forest.nodes;
    if options.as_document {
        if let Some(document) = document::into_document(&nodes, forest.doctype) {
            return Ok(Parsed::Document(document));
        }
        debug!("no doctype or <html> root; returning fragment");
    }

    Ok(match nodes.len() {
        0 => Parsed::Empty,
        1 => Parsed::Node(nodes.remove(0)),
        _ => Parsed::Forest(nodes),
    })
}
