// Highlighted-code rendering.
//
// Produces HTML that *displays* markup: the token stream of the serialized
// tree is escaped and each token class is wrapped in a coloured span, all
// inside a styled `<pre>` block.

use super::escape::{escape_text, quote_attribute};
use super::{handlers, SerializeOptions, Sink};
use crate::node::{Element, HtmlNode};

/// Token classes that receive their own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Background,
    Text,
    TagName,
    AttributeName,
    AttributeValue,
    /// `=` between an attribute name and its value.
    Operator,
    /// `<`, `</` and `>`.
    AngleBracket,
    Comment,
}

/// Colours used by the highlighter, as CSS colour values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub text: String,
    pub tag_name: String,
    pub attribute_name: String,
    pub attribute_value: String,
    pub operator: String,
    pub angle_bracket: String,
    pub comment: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "rgb(21,18,33)".to_string(),
            text: "gray".to_string(),
            tag_name: "rgb(204,225,70)".to_string(),
            attribute_name: "rgb(0,124,0)".to_string(),
            attribute_value: "rgb(170,85,137)".to_string(),
            operator: "gray".to_string(),
            angle_bracket: "rgb(204,225,70)".to_string(),
            comment: "rgb(0,150,0)".to_string(),
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, class: TokenClass) -> &str {
        match class {
            TokenClass::Background => &self.background,
            TokenClass::Text => &self.text,
            TokenClass::TagName => &self.tag_name,
            TokenClass::AttributeName => &self.attribute_name,
            TokenClass::AttributeValue => &self.attribute_value,
            TokenClass::Operator => &self.operator,
            TokenClass::AngleBracket => &self.angle_bracket,
            TokenClass::Comment => &self.comment,
        }
    }

    pub fn with_color(mut self, class: TokenClass, color: impl Into<String>) -> Self {
        let slot = match class {
            TokenClass::Background => &mut self.background,
            TokenClass::Text => &mut self.text,
            TokenClass::TagName => &mut self.tag_name,
            TokenClass::AttributeName => &mut self.attribute_name,
            TokenClass::AttributeValue => &mut self.attribute_value,
            TokenClass::Operator => &mut self.operator,
            TokenClass::AngleBracket => &mut self.angle_bracket,
            TokenClass::Comment => &mut self.comment,
        };
        *slot = color.into();
        self
    }

    /// Build a palette from `class-name → colour` pairs such as
    /// `("tag-name", "red")`. Unknown keys are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::default(), |palette, (key, color)| {
                match TokenClass::from_key(key) {
                    Some(class) => palette.with_color(class, color),
                    None => palette,
                }
            })
    }
}

impl TokenClass {
    fn from_key(key: &str) -> Option<Self> {
        let class = match key.trim().to_ascii_lowercase().as_str() {
            "background" | "bg-color" => Self::Background,
            "text" | "text-color" => Self::Text,
            "tag-name" | "name-color" => Self::TagName,
            "attribute-name" | "attribute-color" => Self::AttributeName,
            "attribute-value" | "attribute-value-color" => Self::AttributeValue,
            "operator" | "operator-color" => Self::Operator,
            "angle-bracket" | "lt-gt-color" => Self::AngleBracket,
            "comment" | "comment-color" => Self::Comment,
            _ => return None,
        };
        Some(class)
    }
}

/// Options for highlighted-code output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Layout of the displayed markup (formatted by default).
    pub serialize: SerializeOptions,
    pub palette: Palette,
}

impl HighlightOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_serialize(mut self, serialize: SerializeOptions) -> Self {
        self.serialize = serialize;
        self
    }
}

struct HighlightSink<'a> {
    out: String,
    palette: &'a Palette,
}

impl HighlightSink<'_> {
    fn span(&mut self, class: TokenClass, escaped: &str) {
        self.out.push_str("<span style=\"color:");
        self.out.push_str(self.palette.color(class));
        self.out.push_str("\">");
        self.out.push_str(escaped);
        self.out.push_str("</span>");
    }
}

impl Sink for HighlightSink<'_> {
    fn open_tag(&mut self, element: &Element) {
        self.span(TokenClass::AngleBracket, "&lt;");
        self.span(TokenClass::TagName, &element.name);
        for (name, value) in element.attributes.iter() {
            self.out.push(' ');
            self.span(TokenClass::AttributeName, name);
            if let Some(value) = value {
                self.span(TokenClass::Operator, "=");
                self.span(
                    TokenClass::AttributeValue,
                    &escape_text(&quote_attribute(value)),
                );
            }
        }
        self.span(TokenClass::AngleBracket, "&gt;");
    }

    fn close_tag(&mut self, name: &str) {
        self.span(TokenClass::AngleBracket, "&lt;/");
        self.span(TokenClass::TagName, name);
        self.span(TokenClass::AngleBracket, "&gt;");
    }

    fn text(&mut self, display: &str) {
        self.span(TokenClass::Text, &escape_text(display));
    }

    fn comment(&mut self, display: &str) {
        let body = format!("&lt;!--{}--&gt;", escape_text(display));
        self.span(TokenClass::Comment, &body);
    }

    fn layout(&mut self, whitespace: &str) {
        self.out.push_str(whitespace);
    }
}

/// Render `nodes` in order inside one highlighted `<pre>` block.
pub(crate) fn render(nodes: &[HtmlNode], options: &HighlightOptions) -> String {
    render_with_doctype(false, nodes, options)
}

/// Render a document root preceded by its `<!DOCTYPE html>` line.
pub(crate) fn render_document(root: &HtmlNode, options: &HighlightOptions) -> String {
    render_with_doctype(true, std::slice::from_ref(root), options)
}

fn render_with_doctype(doctype: bool, nodes: &[HtmlNode], options: &HighlightOptions) -> String {
    let palette = &options.palette;
    let mut sink = HighlightSink {
        out: String::new(),
        palette,
    };
    sink.out.push_str(&format!(
        "<pre style=\"margin:0;padding:0.5em;background-color:{};color:{};\">",
        palette.background, palette.text
    ));
    if doctype {
        sink.span(TokenClass::AngleBracket, "&lt;!");
        sink.span(TokenClass::TagName, "DOCTYPE");
        sink.out.push(' ');
        sink.span(TokenClass::AttributeName, "html");
        sink.span(TokenClass::AngleBracket, "&gt;");
        if options.serialize.formatted {
            sink.out.push('\n');
        }
    }
    for node in nodes {
        handlers::write_tree(&mut sink, node, &options.serialize);
    }
    sink.out.push_str("</pre>");
    sink.out
}
