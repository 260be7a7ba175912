// A full HTML document: `<!DOCTYPE html>` + `<html>` with a head and body.

use std::fmt;

use crate::head::HeadNode;
use crate::node::HtmlNode;
use crate::serialize::{HighlightOptions, SerializeOptions};

const DOCTYPE: &str = "<!DOCTYPE html>";

/// An `<html>` root holding a [`HeadNode`] and a `<body>`.
///
/// ```
/// use htmltree::{HtmlDocument, HtmlNode};
///
/// let doc = HtmlDocument::new();
/// doc.head().set_title(Some("Home"));
/// let p = HtmlNode::new("p").unwrap();
/// p.add_text("Hello", true);
/// doc.add_child(&p);
/// assert!(doc.to_html(false).starts_with("<!DOCTYPE html><html><head><title>Home</title>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    root: HtmlNode,
    head: HeadNode,
    body: HtmlNode,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    /// A document whose head carries the standard viewport meta.
    pub fn new() -> Self {
        Self::with_head(HeadNode::new())
    }

    pub fn with_head(head: HeadNode) -> Self {
        let root = HtmlNode::element("html");
        let body = HtmlNode::element("body");
        root.add_child(head.node());
        root.add_child(&body);
        Self { root, head, body }
    }

    /// The `<html>` element.
    pub fn root(&self) -> &HtmlNode {
        &self.root
    }

    pub fn head(&self) -> &HeadNode {
        &self.head
    }

    pub fn body(&self) -> &HtmlNode {
        &self.body
    }

    /// Swap in a different head. Returns `false` if the current head was
    /// detached from the root.
    pub fn set_head(&mut self, head: HeadNode) -> bool {
        if !self.root.replace_child(self.head.node(), head.node()) {
            return false;
        }
        self.head = head;
        true
    }

    /// Append to the body.
    pub fn add_child(&self, child: &HtmlNode) -> bool {
        self.body.add_child(child)
    }

    pub fn child_by_id(&self, id: &str) -> Option<HtmlNode> {
        self.root.child_by_id(id)
    }

    pub fn children_by_tag_name(&self, name: &str) -> Vec<HtmlNode> {
        self.root.children_by_tag_name(name)
    }

    /// Set `<html lang>`.
    pub fn set_language(&self, lang: &str) -> bool {
        let lang = lang.trim();
        !lang.is_empty() && self.root.set_attribute("lang", lang)
    }

    pub fn language(&self) -> Option<String> {
        self.root.attribute("lang")
    }

    pub fn to_html(&self, formatted: bool) -> String {
        self.to_html_with(&SerializeOptions::new().with_formatted(formatted))
    }

    pub fn to_html_with(&self, options: &SerializeOptions) -> String {
        let separator = if options.formatted { "\n" } else { "" };
        format!("{DOCTYPE}{separator}{}", self.root.to_html_with(options))
    }
}

impl HtmlDocument {
    /// Render the document, doctype included, as highlighted source.
    pub fn to_highlighted_code(&self, options: &HighlightOptions) -> String {
        crate::serialize::highlight::render_document(&self.root, options)
    }
}

impl fmt::Display for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html(false))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_document_compact() {
        let doc = HtmlDocument::with_head(HeadNode::empty());
        assert_eq!(
            doc.to_html(false),
            "<!DOCTYPE html><html><head></head><body></body></html>"
        );
    }

    #[test]
    fn test_document_formatted() {
        let doc = HtmlDocument::with_head(HeadNode::empty());
        doc.set_language("en");
        doc.head().set_title(Some("T"));
        let p = HtmlNode::new("p").unwrap();
        p.add_text("x", true);
        doc.add_child(&p);
        assert_eq!(
            doc.to_html(true),
            concat!(
                "<!DOCTYPE html>\n",
                "<html lang=\"en\">\n",
                "    <head>\n",
                "        <title>\n",
                "            T\n",
                "        </title>\n",
                "    </head>\n",
                "    <body>\n",
                "        <p>\n",
                "            x\n",
                "        </p>\n",
                "    </body>\n",
                "</html>\n",
            )
        );
        assert_eq!(doc.language().as_deref(), Some("en"));
    }

    #[test]
    fn test_default_head_has_viewport() {
        let doc = HtmlDocument::new();
        assert!(doc.head().has_meta("viewport"));
        assert_eq!(doc.head().parent(), Some(doc.root().clone()));
    }

    #[test]
    fn test_set_head() {
        let mut doc = HtmlDocument::new();
        let old = doc.head().clone();
        let head = HeadNode::empty();
        head.set_title(Some("New"));
        assert!(doc.set_head(head));
        assert_eq!(doc.head().title().as_deref(), Some("New"));
        assert_eq!(doc.root().first_child(), Some(doc.head().node().clone()));
        assert!(old.parent().is_none());
    }

    #[test]
    fn test_lookup_through_document() {
        let doc = HtmlDocument::new();
        let div = HtmlNode::new("div").unwrap();
        div.set_id("main");
        doc.add_child(&div);
        assert_eq!(doc.child_by_id("main"), Some(div));
        assert_eq!(doc.children_by_tag_name("meta").len(), 1);
        assert!(!doc.set_language(" "));
    }
}
