// Forest → HtmlDocument.
//
// A parsed `<html>` element is rebuilt as an `HtmlDocument`: head children
// are routed through the `HeadNode` slot setters, body children are moved
// across, and `html` / `body` attributes are copied. Stray top-level nodes
// around `<html>` are moved into the body.

use crate::document::HtmlDocument;
use crate::head::HeadNode;
use crate::node::HtmlNode;

fn copy_attributes(from: &HtmlNode, to: &HtmlNode) {
    for (name, value) in from.attributes() {
        match value {
            Some(value) => to.set_attribute(&name, &value),
            None => to.set_boolean_attribute(&name),
        };
    }
}

fn adopt_head_child(head: &HeadNode, child: &HtmlNode) {
    let name = child.name();
    let accepted = match name.as_str() {
        "title" => head.set_title(Some(&child.text_content())),
        "base" => head.set_base(child.attribute("href").as_deref()),
        "meta" if child.has_attribute("charset") => {
            head.set_charset(child.attribute("charset").as_deref())
        }
        "link" if child
            .attribute("rel")
            .is_some_and(|r| r.trim().eq_ignore_ascii_case("canonical")) =>
        {
            head.set_canonical(child.attribute("href").as_deref())
        }
        "meta" if child.has_attribute("name") => {
            let meta_name = child.attribute("name").unwrap_or_default();
            if head.has_meta(&meta_name) {
                let content = child.attribute("content").unwrap_or_default();
                head.add_meta(&meta_name, &content, true)
            } else {
                head.add_child(child)
            }
        }
        _ => head.add_child(child),
    };
    if !accepted {
        debug!("dropped <{}> from parsed head", name);
    }
}

fn adopt_head(head: &HeadNode, parsed: &HtmlNode) {
    copy_attributes(parsed, head.node());
    for child in parsed.children() {
        if child.is_element() {
            adopt_head_child(head, &child);
        } else if child.is_comment() {
            head.add_child(&child);
        }
    }
}

fn adopt_body(body: &HtmlNode, parsed: &HtmlNode) {
    copy_attributes(parsed, body);
    for child in parsed.children() {
        body.add_child(&child);
    }
}

/// Route one node that sits directly under the document: head elements to
/// the head, everything else to the body.
fn adopt_top_level(document: &HtmlDocument, node: &HtmlNode) {
    match node.name().as_str() {
        "head" => adopt_head(document.head(), node),
        "body" => adopt_body(document.body(), node),
        "title" | "base" | "meta" | "link" => adopt_head_child(document.head(), node),
        "html" => {
            copy_attributes(node, document.root());
            for child in node.children() {
                adopt_top_level(document, &child);
            }
        }
        _ => {
            document.add_child(node);
        }
    }
}

/// Rebuild a parsed forest as a document.
///
/// Returns `None` unless the input had a doctype or a top-level `<html>`
/// element. Nodes before or after the `<html>` element end up in the body.
pub(crate) fn into_document(nodes: &[HtmlNode], doctype: bool) -> Option<HtmlDocument> {
    let html_index = nodes.iter().position(|n| n.name() == "html");
    if html_index.is_none() && !doctype {
        return None;
    }
    let document = HtmlDocument::with_head(HeadNode::empty());
    let Some(index) = html_index else {
        for node in nodes {
            adopt_top_level(&document, node);
        }
        return Some(document);
    };
    for node in &nodes[..index] {
        debug!("moving <{}> before <html> into the document", node.name());
        adopt_top_level(&document, node);
    }
    let html = &nodes[index];
    copy_attributes(html, document.root());
    for child in html.children() {
        if child.is_comment() {
            trace!("dropping comment between head and body");
            continue;
        }
        adopt_top_level(&document, &child);
    }
    for node in &nodes[index + 1..] {
        debug!("moving <{}> after </html> into the document", node.name());
        adopt_top_level(&document, node);
    }
    Some(document)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse::{lexer::tokenize, tree::build};

    fn document(html: &str) -> Option<HtmlDocument> {
        let forest = build(tokenize(html), false).unwrap();
        into_document(&forest.nodes, forest.doctype)
    }

    #[test]
    fn test_fragment_is_not_a_document() {
        assert!(document("<div></div>").is_none());
    }

    #[test]
    fn test_head_slots_are_ordered() {
        let doc = document(concat!(
            "<!DOCTYPE html><html lang=en><head>",
            "<meta name=viewport content=x>",
            "<title>T</title>",
            "<meta charset=utf-8>",
            "<base href=\"http://x/\">",
            "<link rel=stylesheet href=a.css>",
            "</head><body class=b><p>hi</p></body></html>",
        ))
        .unwrap();
        assert_eq!(
            doc.to_html(false),
            concat!(
                "<!DOCTYPE html><html lang=\"en\"><head>",
                "<base href=\"http://x/\">",
                "<title>T</title>",
                "<meta charset=\"utf-8\">",
                "<meta name=\"viewport\" content=\"x\">",
                "<link rel=\"stylesheet\" href=\"a.css\">",
                "</head><body class=\"b\"><p>hi</p></body></html>",
            )
        );
        assert_eq!(doc.head().title().as_deref(), Some("T"));
        assert_eq!(doc.head().css_nodes().len(), 1);
    }

    #[test]
    fn test_duplicate_meta_overrides() {
        let doc = document(
            "<html><head><meta name=a content=1><meta name=a content=2></head></html>",
        )
        .unwrap();
        let meta = doc.head().meta("a").unwrap();
        assert_eq!(meta.attribute("content").as_deref(), Some("2"));
        assert_eq!(doc.head().child_count(), 1);
    }

    #[test]
    fn test_doctype_without_html_routes_head_elements() {
        let doc = document("<!doctype html><title>x</title><meta charset=utf-8>").unwrap();
        assert_eq!(doc.head().title().as_deref(), Some("x"));
        assert_eq!(doc.head().charset().as_deref(), Some("utf-8"));
        assert_eq!(doc.body().child_count(), 0);
    }

    #[test]
    fn test_doctype_without_html_wraps_body() {
        let doc = document("<!doctype html><p>x</p>").unwrap();
        assert_eq!(doc.body().child_count(), 1);
        assert_eq!(doc.to_html(false), "<!DOCTYPE html><html><head></head><body><p>x</p></body></html>");
    }

    #[test]
    fn test_content_after_html_moves_into_body() {
        let doc = document("<!DOCTYPE html><html><body><p>a</p></body></html><p>tail</p>tail text")
            .unwrap();
        assert_eq!(
            doc.to_html(false),
            "<!DOCTYPE html><html><head></head><body><p>a</p><p>tail</p>tail text</body></html>"
        );
    }

    #[test]
    fn test_content_before_html_is_kept() {
        let doc = document("<title>T</title><p>first</p><html lang=en><body><p>b</p></body></html>")
            .unwrap();
        assert_eq!(doc.head().title().as_deref(), Some("T"));
        assert_eq!(
            doc.body().to_html(false),
            "<body><p>first</p><p>b</p></body>"
        );
        assert_eq!(doc.root().attribute("lang").as_deref(), Some("en"));
    }
}
