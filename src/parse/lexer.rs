// Delimiter-splitting lexer.
//
// Input is cut at each `<` and the next `>` outside a quoted attribute value;
// the text between is a tag signature. A `<` that does not open a valid tag is kept as text.
// Comments run to `-->` and `script` / `style` bodies run to their closing
// tag without being split further.

use super::attributes::parse_attributes;
use crate::node::names::is_raw_text_element;
use crate::node::{is_valid_name, is_void_element};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fragment {
    Text(String),
    Comment(String),
    Doctype,
    Open {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    Close {
        name: String,
        /// Byte offset of the `<`.
        offset: usize,
    },
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    pending_text: String,
    fragments: Vec<Fragment>,
}

/// Split `input` into fragments. Never fails.
pub(crate) fn tokenize(input: &str) -> Vec<Fragment> {
    let lexer = Lexer {
        input,
        pos: 0,
        pending_text: String::new(),
        fragments: Vec::new(),
    };
    lexer.run()
}

impl Lexer<'_> {
    fn run(mut self) -> Vec<Fragment> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            let Some(lt) = rest.find('<') else {
                self.pending_text.push_str(rest);
                self.pos = self.input.len();
                break;
            };
            self.pending_text.push_str(&rest[..lt]);
            let tag_start = self.pos + lt;
            let after = &self.input[tag_start + 1..];

            if let Some(body) = after.strip_prefix("!--") {
                let (comment, consumed) = if body.starts_with('>') {
                    ("", 4)
                } else if body.starts_with("->") {
                    ("", 5)
                } else {
                    match body.find("-->") {
                        Some(end) => (&body[..end], 3 + end + 3),
                        None => (body, 3 + body.len()),
                    }
                };
                self.flush_text();
                self.fragments.push(Fragment::Comment(comment.to_string()));
                self.pos = tag_start + 1 + consumed;
                continue;
            }

            let Some(gt) = tag_end(after) else {
                // No closing delimiter: the rest of the input is text.
                self.pending_text.push_str(&self.input[tag_start..]);
                self.pos = self.input.len();
                break;
            };
            let signature = &after[..gt];

            match classify(signature, tag_start) {
                Some(fragment) => {
                    self.pos = tag_start + 1 + gt + 1;
                    self.flush_text();
                    let raw_text = match &fragment {
                        Fragment::Open {
                            name,
                            self_closing: false,
                            ..
                        } if is_raw_text_element(name) => Some(name.clone()),
                        _ => None,
                    };
                    self.fragments.push(fragment);
                    if let Some(name) = raw_text {
                        self.raw_text(&name);
                    }
                }
                None => {
                    // Only the `<` is text; scanning resumes right after it.
                    trace!("no tag at byte {}", tag_start);
                    self.pending_text.push('<');
                    self.pos = tag_start + 1;
                }
            }
        }
        self.flush_text();
        self.fragments
    }

    /// Emit buffered text unless it is whitespace only.
    fn flush_text(&mut self) {
        if self.pending_text.trim().is_empty() {
            self.pending_text.clear();
        } else {
            self.fragments
                .push(Fragment::Text(std::mem::take(&mut self.pending_text)));
        }
    }

    /// Consume the body of a `script` / `style` element verbatim.
    fn raw_text(&mut self, name: &str) {
        let rest = &self.input[self.pos..];
        let Some(end) = raw_text_end(rest, name) else {
            if !rest.trim().is_empty() {
                self.fragments.push(Fragment::Text(rest.to_string()));
            }
            self.pos = self.input.len();
            return;
        };
        let body = &rest[..end];
        if !body.trim().is_empty() {
            self.fragments.push(Fragment::Text(body.to_string()));
        }
        let offset = self.pos + end;
        self.fragments.push(Fragment::Close {
            name: name.to_string(),
            offset,
        });
        self.pos = match rest[end..].find('>') {
            Some(gt) => offset + gt + 1,
            None => self.input.len(),
        };
    }
}

/// Byte index of the `>` that ends the tag starting at `after`.
///
/// A `>` inside a quoted attribute value does not end the tag. A quote opens
/// a string only at the start of a token, as in the attribute tokenizer. If
/// a quote never closes, the first `>` is used.
fn tag_end(after: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut token_start = true;
    for (i, c) in after.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
                token_start = false;
            }
            continue;
        }
        match c {
            '>' => return Some(i),
            '"' | '\'' if token_start => quote = Some(c),
            '=' => token_start = true,
            c if c.is_whitespace() => token_start = true,
            _ => token_start = false,
        }
    }
    after.find('>')
}

/// Byte index of the closing `</name` of a raw text body. The name must be
/// followed by whitespace, `/`, `>` or the end of input.
fn raw_text_end(rest: &str, name: &str) -> Option<usize> {
    let needle = format!("</{name}");
    // ASCII lowercasing keeps byte offsets unchanged.
    let lower = rest.to_ascii_lowercase();
    let mut from = 0;
    while let Some(found) = lower[from..].find(&needle) {
        let start = from + found;
        let after = start + needle.len();
        match lower.as_bytes().get(after) {
            None | Some(b'/' | b'>') => return Some(start),
            Some(b) if b.is_ascii_whitespace() => return Some(start),
            _ => from = after,
        }
    }
    None
}

/// Classify a tag signature (the text between `<` and `>`).
fn classify(signature: &str, offset: usize) -> Option<Fragment> {
    if let Some(bang) = signature.strip_prefix('!') {
        if bang.get(..7).is_some_and(|k| k.eq_ignore_ascii_case("doctype")) {
            return Some(Fragment::Doctype);
        }
        // Other `<!...>` constructs are treated as comments.
        return Some(Fragment::Comment(bang.to_string()));
    }

    if let Some(close) = signature.strip_prefix('/') {
        let name = close.split_whitespace().next().unwrap_or_default();
        if !is_valid_name(name) {
            return None;
        }
        return Some(Fragment::Close {
            name: name.to_ascii_lowercase(),
            offset,
        });
    }

    let trimmed = signature.trim_end();
    let (body, self_closing) = match trimmed.strip_suffix('/') {
        Some(body) if ends_attribute_list(body) => (body, true),
        _ => (trimmed, false),
    };
    let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
    let name = &body[..name_end];
    if !is_valid_name(name) {
        return None;
    }
    let name = name.to_ascii_lowercase();
    let self_closing = self_closing && !is_void_element(&name);
    Some(Fragment::Open {
        attributes: parse_attributes(&body[name_end..]),
        name,
        self_closing,
    })
}

/// Whether a trailing `/` after `body` is a self-closing marker rather than
/// the end of an unquoted value such as `href=/x/`.
fn ends_attribute_list(body: &str) -> bool {
    !body.contains(char::is_whitespace)
        || body.ends_with(char::is_whitespace)
        || body.ends_with(['"', '\''])
}
