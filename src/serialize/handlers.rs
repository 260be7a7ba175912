// Tree walk shared by every sink.
//
// Opens are emitted pre-order and closes post-order from an explicit stack,
// so arbitrarily deep trees serialize without recursion.

use super::{SerializeOptions, Sink};
use crate::node::{is_preformatted_element, Element, HtmlNode, NodeKind};

enum Step {
    Visit { node: HtmlNode, ambient: bool },
    Leave {
        name: String,
        formatted: bool,
        end_line: bool,
    },
}

/// Walk state threaded through the visit/leave handlers.
struct State<'a, S: Sink> {
    sink: &'a mut S,
    options: &'a SerializeOptions,
    depth: usize,
    stack: Vec<Step>,
}

/// Serialize `root` into `sink`.
pub(crate) fn write_tree<S: Sink>(sink: &mut S, root: &HtmlNode, options: &SerializeOptions) {
    let mut state = State {
        sink,
        options,
        depth: options.initial_depth,
        stack: vec![Step::Visit {
            node: root.clone(),
            ambient: options.formatted,
        }],
    };
    while let Some(step) = state.stack.pop() {
        match step {
            Step::Visit { node, ambient } => state.visit(&node, ambient),
            Step::Leave {
                name,
                formatted,
                end_line,
            } => state.leave(&name, formatted, end_line),
        }
    }
}

/// Whether an element's subtree is written formatted.
///
/// An explicit override wins; otherwise whitespace-significant elements are
/// always compact and everything else follows the surrounding mode.
fn effective_mode(element: &Element, ambient: bool) -> bool {
    element
        .format_override
        .unwrap_or(ambient && !is_preformatted_element(&element.name))
}

impl<S: Sink> State<'_, S> {
    fn indent(&mut self) {
        let indent = self.options.tab.repeat(self.depth);
        self.sink.layout(&indent);
    }

    fn newline(&mut self) {
        self.sink.layout("\n");
    }

    // A node sits on its own line when its surroundings are formatted or it
    // is formatted itself; a compact node inside formatted output is one line.
    fn visit(&mut self, node: &HtmlNode, ambient: bool) {
        let kind = node.kind();
        match &*kind {
            NodeKind::Text(_) | NodeKind::Comment(_) => {
                let display = node.display_text().unwrap_or_default();
                if ambient {
                    self.indent();
                }
                if matches!(&*kind, NodeKind::Comment(_)) {
                    self.sink.comment(&display);
                } else {
                    self.sink.text(&display);
                }
                if ambient {
                    self.newline();
                }
            }
            NodeKind::Element(element) => {
                let formatted = effective_mode(element, ambient);
                let line = ambient || formatted;
                if line {
                    self.indent();
                }
                self.sink.open_tag(element);
                if element.is_void() {
                    if line {
                        self.newline();
                    }
                    return;
                }
                let children = node.children();
                if children.is_empty() {
                    self.sink.close_tag(&element.name);
                    if line {
                        self.newline();
                    }
                    return;
                }
                if formatted {
                    self.newline();
                }
                self.depth += 1;
                self.stack.push(Step::Leave {
                    name: element.name.clone(),
                    formatted,
                    end_line: line,
                });
                for child in children.into_iter().rev() {
                    self.stack.push(Step::Visit {
                        node: child,
                        ambient: formatted,
                    });
                }
            }
        }
    }

    fn leave(&mut self, name: &str, formatted: bool, end_line: bool) {
        self.depth -= 1;
        if formatted {
            self.indent();
        }
        self.sink.close_tag(name);
        if end_line {
            self.newline();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::node::HtmlNode;
    use crate::serialize::SerializeOptions;

    fn el(name: &str) -> HtmlNode {
        HtmlNode::new(name).unwrap()
    }

    fn div_p_hi() -> HtmlNode {
        let div = el("div");
        let p = el("p");
        p.add_text("hi", true);
        div.add_child(&p);
        div
    }

    #[test]
    fn test_compact() {
        assert_eq!(div_p_hi().to_html(false), "<div><p>hi</p></div>");
    }

    #[test]
    fn test_formatted() {
        assert_eq!(
            div_p_hi().to_html(true),
            "<div>\n    <p>\n        hi\n    </p>\n</div>\n"
        );
    }

    #[test]
    fn test_custom_tab_and_depth() {
        let options = SerializeOptions::new().with_tab_width(2).with_initial_depth(1);
        assert_eq!(
            div_p_hi().to_html_with(&options),
            "  <div>\n    <p>\n      hi\n    </p>\n  </div>\n"
        );
    }

    #[test]
    fn test_code_body_is_literal() {
        let div = el("div");
        let code = el("code");
        code.add_text("a\nb", true);
        div.add_child(&code);
        assert_eq!(div.to_html(true), "<div>\n    <code>a\nb</code>\n</div>\n");
    }

    #[test]
    fn test_pre_subtree_stays_compact() {
        let pre = el("pre");
        let span = el("span");
        span.add_text("x", true);
        pre.add_child(&span);
        pre.add_text("\n  y", true);
        assert_eq!(pre.to_html(true), "<pre><span>x</span>\n  y</pre>\n");
    }

    #[test]
    fn test_override_compact_inside_formatted() {
        let div = div_p_hi();
        div.child(0).unwrap().set_format_override(Some(false));
        assert_eq!(div.to_html(true), "<div>\n    <p>hi</p>\n</div>\n");
    }

    #[test]
    fn test_override_formatted_inside_compact() {
        let div = div_p_hi();
        div.set_format_override(Some(true));
        assert_eq!(
            div.to_html(false),
            "<div>\n    <p>\n        hi\n    </p>\n</div>\n"
        );
    }

    #[test]
    fn test_override_can_unlock_pre() {
        let pre = el("pre");
        pre.add_text("x", true);
        pre.set_format_override(Some(true));
        assert_eq!(pre.to_html(true), "<pre>\n    x\n</pre>\n");
    }

    #[test]
    fn test_void_and_empty_elements() {
        let div = el("div");
        div.add_child(&el("br"));
        div.add_child(&el("span"));
        assert_eq!(div.to_html(false), "<div><br><span></span></div>");
        assert_eq!(div.to_html(true), "<div>\n    <br>\n    <span></span>\n</div>\n");
    }

    #[test]
    fn test_comment_output() {
        let div = el("div");
        div.add_comment("note -->");
        assert_eq!(div.to_html(false), "<div><!--note -- --></div>");
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        let root = el("div");
        let mut current = root.clone();
        for _ in 0..5_000 {
            let next = el("div");
            current.add_child(&next);
            current = next;
        }
        let html = root.to_html(false);
        assert_eq!(html.len(), 5_001 * "<div></div>".len());
    }
}
