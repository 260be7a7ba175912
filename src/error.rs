/// Errors that can occur while building or strictly parsing an HTML tree.
///
/// Mutation methods never return these; they report rejection through their
/// `bool` / `Option` results instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HtmlTreeError {
    #[error("invalid node name: {0:?}")]
    InvalidNodeName(String),

    #[error("closing tag </{found}> at byte {offset} does not match open <{expected}>")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("closing tag </{name}> at byte {offset} has no open element")]
    UnexpectedClosingTag { name: String, offset: usize },

    #[error("element <{0}> is never closed")]
    UnclosedElement(String),
}
