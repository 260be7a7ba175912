// HTML tree → HTML text serializer.
//
// Walks a node subtree with an explicit work stack and feeds tokens to a
// `Sink`. The plain sink writes HTML; the highlight sink writes the same
// token stream as colour-styled spans for displaying markup as code.

pub(crate) mod escape;
pub(crate) mod handlers;
pub(crate) mod highlight;

pub use highlight::{HighlightOptions, Palette, TokenClass};

use crate::node::{Element, HtmlNode};

/// Serializer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Put every tag and leaf on its own indented line.
    pub formatted: bool,
    /// Indentation unit for one nesting level.
    pub tab: String,
    /// Nesting level of the subtree root.
    pub initial_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            formatted: true,
            tab: "    ".to_string(),
            initial_depth: 0,
        }
    }
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }

    /// Indent with `width` spaces per level.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab = " ".repeat(width);
        self
    }

    /// Indent with an arbitrary string, e.g. `"\t"`.
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = tab.into();
        self
    }

    pub fn with_initial_depth(mut self, depth: usize) -> Self {
        self.initial_depth = depth;
        self
    }
}

/// Receives the token stream of a serialized tree.
pub(crate) trait Sink {
    fn open_tag(&mut self, element: &Element);
    fn close_tag(&mut self, name: &str);
    fn text(&mut self, display: &str);
    fn comment(&mut self, display: &str);
    /// Layout whitespace: indentation and line breaks.
    fn layout(&mut self, whitespace: &str);
}

/// Plain HTML output.
pub(crate) struct HtmlSink {
    pub out: String,
}

impl Sink for HtmlSink {
    fn open_tag(&mut self, element: &Element) {
        write_open_tag(&mut self.out, element);
    }

    fn close_tag(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn text(&mut self, display: &str) {
        self.out.push_str(display);
    }

    fn comment(&mut self, display: &str) {
        self.out.push_str("<!--");
        self.out.push_str(display);
        self.out.push_str("-->");
    }

    fn layout(&mut self, whitespace: &str) {
        self.out.push_str(whitespace);
    }
}

fn write_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in element.attributes.iter() {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push('=');
            out.push_str(&escape::quote_attribute(value));
        }
    }
    out.push('>');
}

/// Render an element's opening tag.
pub(crate) fn open_tag(element: &Element) -> String {
    let mut out = String::new();
    write_open_tag(&mut out, element);
    out
}

/// Serialize a subtree to HTML text.
pub(crate) fn to_html(node: &HtmlNode, options: &SerializeOptions) -> String {
    let mut sink = HtmlSink { out: String::new() };
    handlers::write_tree(&mut sink, node, options);
    sink.out
}

/// Serialize a subtree as highlighted, display-ready HTML source.
pub(crate) fn to_highlighted_code(node: &HtmlNode, options: &HighlightOptions) -> String {
    highlight::render(&[node.clone()], options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SerializeOptions::default();
        assert!(options.formatted);
        assert_eq!(options.tab, "    ");
        assert_eq!(options.initial_depth, 0);
    }

    #[test]
    fn test_options_builder() {
        let options = SerializeOptions::new()
            .with_formatted(false)
            .with_tab_width(2)
            .with_initial_depth(3);
        assert!(!options.formatted);
        assert_eq!(options.tab, "  ");
        assert_eq!(options.initial_depth, 3);
        assert_eq!(SerializeOptions::new().with_tab("\t").tab, "\t");
    }

    #[test]
    fn test_open_tag_quoting() {
        let node = HtmlNode::new("input").unwrap();
        node.set_attribute("type", "text");
        node.set_boolean_attribute("disabled");
        node.set_attribute("title", "say \"hi\"");
        assert_eq!(
            node.open_tag(),
            "<input type=\"text\" disabled title='say \"hi\"'>"
        );
    }
}
