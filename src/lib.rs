// htmltree: build, parse and serialize HTML node trees.
//
// Architecture:
//   HTML string → lexer (fragments) → tree builder → HtmlNode tree → serializer → HTML string
//
// The tree is mutable in place through shared `HtmlNode` handles. Output is
// compact, indented, or a syntax-highlighted rendering of the markup itself.

#[macro_use]
mod log;

mod document;
mod error;
mod head;
mod node;
mod parse;
mod serialize;

pub use document::HtmlDocument;
pub use error::HtmlTreeError;
pub use head::HeadNode;
pub use node::{
    is_preformatted_element, is_valid_name, is_void_element, parse_style, render_style,
    Attributes, Element, HtmlNode, NodeKind, TextData,
};
pub use parse::{parse, parse_with, ParseOptions, Parsed};
pub use serialize::{HighlightOptions, Palette, SerializeOptions, TokenClass};

/// Options for the string-to-string entry points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Serializer layout.
    pub serialize: SerializeOptions,
    /// Parser behaviour.
    pub parse: ParseOptions,
    /// Colours for [`highlight_with`].
    pub palette: Palette,
}

impl Options {
    /// Create a new Options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is indented, one node per line.
    pub fn with_formatted(mut self, formatted: bool) -> Self {
        self.serialize.formatted = formatted;
        self
    }

    /// Indent with `width` spaces per level.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.serialize = self.serialize.with_tab_width(width);
        self
    }

    /// Indent with an arbitrary string.
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.serialize.tab = tab.into();
        self
    }

    /// Set whether malformed structure is an error.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.parse.strict = strict;
        self
    }

    /// Set whether `<html>` input is rebuilt as a document.
    pub fn with_document(mut self, as_document: bool) -> Self {
        self.parse.as_document = as_document;
        self
    }

    /// Set the highlighter palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

/// Re-indent an HTML string using default options.
///
/// # Examples
///
/// ```
/// let html = htmltree::format("<div><p>Hi</p></div>").unwrap();
/// assert_eq!(html, "<div>\n    <p>\n        Hi\n    </p>\n</div>\n");
/// ```
pub fn format(html: &str) -> Result<String, HtmlTreeError> {
    format_with(html, &Options::default())
}

/// Parse and re-serialize an HTML string.
///
/// # Examples
///
/// ```
/// use htmltree::{format_with, Options};
///
/// let options = Options::new().with_formatted(false);
/// let html = format_with("<DIV>\n  <p>Hi</p>\n</DIV>", &options).unwrap();
/// assert_eq!(html, "<div><p>Hi</p></div>");
/// ```
pub fn format_with(html: &str, options: &Options) -> Result<String, HtmlTreeError> {
    let parsed = parse_with(html, &options.parse)?;
    if let Parsed::Document(document) = &parsed {
        return Ok(document.to_html_with(&options.serialize));
    }
    Ok(parsed
        .into_nodes()
        .iter()
        .map(|node| node.to_html_with(&options.serialize))
        .collect())
}

/// Parse an HTML string and render it as highlighted, display-ready source.
pub fn highlight_with(html: &str, options: &Options) -> Result<String, HtmlTreeError> {
    let parsed = parse_with(html, &options.parse)?;
    let highlight = HighlightOptions::new()
        .with_serialize(options.serialize.clone())
        .with_palette(options.palette.clone());
    if let Parsed::Document(document) = &parsed {
        return Ok(document.to_highlighted_code(&highlight));
    }
    Ok(serialize::highlight::render(&parsed.into_nodes(), &highlight))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_empty() {
        assert_eq!(format("").unwrap(), "");
        assert_eq!(format("   \n").unwrap(), "");
    }

    #[test]
    fn test_format_forest() {
        assert_eq!(
            format_with("<p>a</p> <p>b</p>", &Options::new().with_formatted(false)).unwrap(),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(format("<br><hr>").unwrap(), "<br>\n<hr>\n");
    }

    #[test]
    fn test_format_document() {
        let options = Options::new().with_document(true).with_formatted(false);
        assert_eq!(
            format_with("<!doctype html><title>x</title>", &options).unwrap(),
            "<!DOCTYPE html><html><head><title>x</title></head><body></body></html>"
        );
    }

    #[test]
    fn test_strict_option() {
        let options = Options::new().with_strict(true);
        assert_eq!(
            format_with("<p>", &options).unwrap_err(),
            HtmlTreeError::UnclosedElement("p".to_string())
        );
    }

    #[test]
    fn test_highlight_with() {
        let options = Options::new()
            .with_formatted(false)
            .with_palette(Palette::new().with_color(TokenClass::TagName, "red"));
        let html = highlight_with("<b>x</b>", &options).unwrap();
        assert!(html.starts_with("<pre style="));
        assert!(html.contains("<span style=\"color:red\">b</span>"));
    }

    #[test]
    fn test_highlight_document_keeps_doctype() {
        let options = Options::new().with_document(true).with_formatted(false);
        let html = highlight_with("<!doctype html><p>x</p>", &options).unwrap();
        assert!(html.contains(">DOCTYPE<"));
        // Doctype, `<html>` and `</html>`.
        assert_eq!(html.matches(">html<").count(), 3);
    }

    #[test]
    fn test_options_builder() {
        let options = Options::new()
            .with_tab_width(2)
            .with_formatted(false)
            .with_strict(true)
            .with_document(true);
        assert_eq!(options.serialize.tab, "  ");
        assert!(!options.serialize.formatted);
        assert!(options.parse.strict);
        assert!(options.parse.as_document);
        assert_eq!(Options::new().with_tab("\t").serialize.tab, "\t");
    }

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(options.serialize.formatted);
        assert_eq!(options.serialize.tab, "    ");
        assert!(!options.parse.strict);
        assert_eq!(options.palette, Palette::default());
    }
}
