// Output escaping for text, comments and attribute values.

/// Escape `&`, `<` and `>` as entities.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Defuse comment delimiters so a comment body cannot close or reopen the
/// comment it is written into.
pub(crate) fn neutralize_comment(text: &str) -> String {
    text.replace("<!--", " --").replace("-->", "-- ")
}

/// Quote an attribute value.
///
/// Double quotes unless the value contains `"` and no `'`; a value holding
/// both quote characters keeps double quotes and writes `"` as `&quot;`.
pub(crate) fn quote_attribute(value: &str) -> String {
    match (value.contains('"'), value.contains('\'')) {
        (false, _) => format!("\"{value}\""),
        (true, false) => format!("'{value}'"),
        (true, true) => format!("\"{}\"", value.replace('"', "&quot;")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<a href='x'>&</a>"), "&lt;a href='x'&gt;&amp;&lt;/a&gt;");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn test_neutralize_comment() {
        assert_eq!(neutralize_comment("x-->y"), "x-- y");
        assert_eq!(neutralize_comment("<!--x"), " --x");
    }

    #[test]
    fn test_quote_attribute() {
        assert_eq!(quote_attribute("a b"), "\"a b\"");
        assert_eq!(quote_attribute("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quote_attribute("it's \"x\""), "\"it's &quot;x&quot;\"");
    }
}
