// Fragment stream → node forest.
//
// Open elements are tracked on an explicit stack so nesting depth is only
// bounded by memory. Leniently, any closing tag pops the innermost open
// element and stray closers are dropped; strictly, every closer must match.

use super::lexer::Fragment;
use crate::error::HtmlTreeError;
use crate::node::{is_void_element, HtmlNode};

/// Top-level nodes plus whether a doctype was seen.
#[derive(Debug, Default)]
pub(crate) struct Forest {
    pub nodes: Vec<HtmlNode>,
    pub doctype: bool,
}

struct Builder {
    strict: bool,
    roots: Vec<HtmlNode>,
    open: Vec<HtmlNode>,
    doctype: bool,
}

impl Builder {
    fn attach(&mut self, node: &HtmlNode) {
        match self.open.last() {
            Some(parent) => {
                parent.add_child(node);
            }
            None => self.roots.push(node.clone()),
        }
    }

    fn open_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    ) {
        let Ok(node) = HtmlNode::new(name) else {
            return;
        };
        for (key, value) in attributes {
            let accepted = match value {
                Some(value) => node.set_attribute(&key, &value),
                None => node.set_boolean_attribute(&key),
            };
            if !accepted {
                trace!("dropped attribute {} on <{}>", key, name);
            }
        }
        self.attach(&node);
        if !self_closing && !node.is_void() {
            self.open.push(node);
        }
    }

    fn close_element(&mut self, name: &str, offset: usize) -> Result<(), HtmlTreeError> {
        let Some(top) = self.open.last() else {
            if self.strict {
                return Err(HtmlTreeError::UnexpectedClosingTag {
                    name: name.to_string(),
                    offset,
                });
            }
            debug!("ignoring stray </{}> at byte {}", name, offset);
            return Ok(());
        };
        let expected = top.name();
        if self.strict && expected != name {
            return Err(HtmlTreeError::MismatchedClosingTag {
                expected,
                found: name.to_string(),
                offset,
            });
        }
        if is_void_element(name) {
            // A void closer can never match an open element.
            debug!("ignoring </{}> at byte {}", name, offset);
            return Ok(());
        }
        self.open.pop();
        Ok(())
    }

    fn text(&mut self, text: String) {
        // Parsed text is already markup; it is written back unchanged.
        self.attach(&HtmlNode::text(&text, false));
    }
}

/// Assemble fragments into a forest of top-level nodes.
///
/// # Errors
///
/// Only in strict mode: a closing tag that does not match the innermost open
/// element, a closing tag with nothing open, or elements still open at the
/// end of input.
pub(crate) fn build(fragments: Vec<Fragment>, strict: bool) -> Result<Forest, HtmlTreeError> {
    let mut builder = Builder {
        strict,
        roots: Vec::new(),
        open: Vec::new(),
        doctype: false,
    };
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => builder.text(text),
            Fragment::Comment(text) => builder.attach(&HtmlNode::comment(&text)),
            Fragment::Doctype => builder.doctype = true,
            Fragment::Open {
                name,
                attributes,
                self_closing,
            } => builder.open_element(&name, attributes, self_closing),
            Fragment::Close { name, offset } => builder.close_element(&name, offset)?,
        }
    }
    if strict {
        if let Some(unclosed) = builder.open.last() {
            return Err(HtmlTreeError::UnclosedElement(unclosed.name()));
        }
    }
    Ok(Forest {
        nodes: builder.roots,
        doctype: builder.doctype,
    })
}
