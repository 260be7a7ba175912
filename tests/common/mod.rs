// Shared test helpers for htmltree.

use std::fs;
use std::path::Path;

use htmltree::{HtmlNode, Options};

/// A fixture's input, expected output and options.
pub struct Fixture {
    pub html: String,
    pub expected: String,
    pub options: Options,
}

/// Load a test fixture's input HTML, expected HTML, and options.
///
/// Fixture directories contain `index.html`, `expected.html`, and optionally
/// `index.json` with `formatted`, `tab`, `strict` and `document` keys.
pub fn load_fixture(name: &str) -> Fixture {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-fixtures").join(name);
    let html = fs::read_to_string(base.join("index.html"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.html", name));
    let expected = fs::read_to_string(base.join("expected.html"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/expected.html", name));

    let mut options = Options::default();

    // Parse index.json if it exists.
    if let Ok(json_str) = fs::read_to_string(base.join("index.json")) {
        if let Ok(val) = serde_json::from_str::<serde_json::Value>(&json_str) {
            if let Some(b) = val.get("formatted").and_then(|v| v.as_bool()) {
                options = options.with_formatted(b);
            }
            if let Some(n) = val.get("tab").and_then(|v| v.as_u64()) {
                options = options.with_tab_width(n as usize);
            }
            if let Some(b) = val.get("strict").and_then(|v| v.as_bool()) {
                options = options.with_strict(b);
            }
            if let Some(b) = val.get("document").and_then(|v| v.as_bool()) {
                options = options.with_document(b);
            }
        }
    }

    Fixture { html, expected, options }
}

/// Shorthand for an element that must be valid.
#[allow(dead_code)]
pub fn el(name: &str) -> HtmlNode {
    HtmlNode::new(name).unwrap_or_else(|e| panic!("{e}"))
}
