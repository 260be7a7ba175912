// Tag and attribute name rules.

use std::sync::LazyLock;

use regex::Regex;

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: [&str; 14] = [
    "br", "hr", "meta", "img", "input", "wbr", "embed", "base", "col", "link", "param", "source",
    "track", "area",
];

/// Elements whose bodies are whitespace-significant and are never re-indented.
pub const PREFORMATTED_ELEMENTS: [&str; 3] = ["pre", "code", "textarea"];

/// Elements whose bodies the parser reads as raw text up to the closing tag.
pub(crate) const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

pub(crate) const TEXT_NAME: &str = "#text";
pub(crate) const COMMENT_NAME: &str = "#comment";

#[allow(clippy::expect_used)]
static NAME_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z:@][A-Za-z0-9:@-]*$").expect("name grammar regex"));

/// Whether `name` is a legal tag or attribute name.
///
/// Names are non-empty, may not start with a digit or `-`, and only contain
/// ASCII letters, digits, `:`, `@` and `-`.
pub fn is_valid_name(name: &str) -> bool {
    NAME_GRAMMAR.is_match(name)
}

/// Whether `name` (case-insensitive) is a void element.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Whether `name` (case-insensitive) is a whitespace-significant element.
pub fn is_preformatted_element(name: &str) -> bool {
    PREFORMATTED_ELEMENTS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(name))
}

pub(crate) fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["div", "my-element", "svg:rect", "@click", "h1", "x"] {
            assert!(is_valid_name(name), "{name}");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "1div", "-x", "a b", "a.b", "a>b", "é"] {
            assert!(!is_valid_name(name), "{name}");
        }
    }

    #[test]
    fn test_void_lookup_ignores_case() {
        assert!(is_void_element("BR"));
        assert!(is_void_element("meta"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn test_preformatted() {
        assert!(is_preformatted_element("PRE"));
        assert!(is_preformatted_element("textarea"));
        assert!(!is_preformatted_element("p"));
    }
}
