// Attribute list tokenizer for a tag signature.
//
// The text after the tag name is split into words, `=` and quoted strings,
// then paired up as `name`, `name=value` or `name="value"`. Whitespace inside
// quotes is kept.

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Equals,
    Quoted(String),
}

fn tokenize(signature: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut quote: Option<char> = None;

    fn flush(word: &mut String, tokens: &mut Vec<Token>) {
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(word)));
        }
    }

    for c in signature.chars() {
        if let Some(q) = quote {
            if c == q {
                tokens.push(Token::Quoted(std::mem::take(&mut word)));
                quote = None;
            } else {
                word.push(c);
            }
            continue;
        }
        match c {
            // A quote only opens a string at the start of a token.
            '"' | '\'' if word.is_empty() => quote = Some(c),
            '=' => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::Equals);
            }
            c if c.is_whitespace() => flush(&mut word, &mut tokens),
            c => word.push(c),
        }
    }
    if quote.is_some() {
        // Unterminated string runs to the end of the signature.
        tokens.push(Token::Quoted(word));
    } else {
        flush(&mut word, &mut tokens);
    }
    tokens
}

/// Parse the attribute part of a tag signature into `(name, value)` pairs.
///
/// Names are lowercased; `None` marks a valueless attribute. When a name
/// repeats, the first occurrence wins. `&quot;` in a quoted value is decoded;
/// other entities are kept as written.
pub(crate) fn parse_attributes(signature: &str) -> Vec<(String, Option<String>)> {
    let tokens = tokenize(signature);
    let mut pairs: Vec<(String, Option<String>)> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let Token::Word(name) = &tokens[i] else {
            trace!("skipping stray attribute token {:?}", tokens[i]);
            i += 1;
            continue;
        };
        let value = if tokens.get(i + 1) == Some(&Token::Equals) {
            match tokens.get(i + 2) {
                Some(Token::Word(v)) => {
                    i += 3;
                    Some(v.clone())
                }
                Some(Token::Quoted(v)) => {
                    i += 3;
                    Some(v.replace("&quot;", "\""))
                }
                _ => {
                    i += 2;
                    Some(String::new())
                }
            }
        } else {
            i += 1;
            None
        };
        let name = name.to_ascii_lowercase();
        if pairs.iter().any(|(existing, _)| *existing == name) {
            continue;
        }
        pairs.push((name, value));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pairs(raw: &[(&str, Option<&str>)]) -> Vec<(String, Option<String>)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_mixed_forms() {
        assert_eq!(
            parse_attributes(" type=text disabled placeholder=\"a b\" class=Foo"),
            pairs(&[
                ("type", Some("text")),
                ("disabled", None),
                ("placeholder", Some("a b")),
                ("class", Some("Foo")),
            ])
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(
            parse_attributes("a = 'x y'  b= z"),
            pairs(&[("a", Some("x y")), ("b", Some("z"))])
        );
    }

    #[test]
    fn test_quotes_inside_values() {
        assert_eq!(
            parse_attributes(r#"title='say "hi"' alt="it's""#),
            pairs(&[("title", Some("say \"hi\"")), ("alt", Some("it's"))])
        );
    }

    #[test]
    fn test_quot_entity_decoded_in_quoted_value() {
        assert_eq!(
            parse_attributes(r#"title="it's &quot;x&quot;" alt=&quot; href="a&amp;b""#),
            pairs(&[
                ("title", Some("it's \"x\"")),
                ("alt", Some("&quot;")),
                ("href", Some("a&amp;b")),
            ])
        );
    }

    #[test]
    fn test_unquoted_value_keeps_apostrophe() {
        assert_eq!(parse_attributes("data-x=b'c"), pairs(&[("data-x", Some("b'c"))]));
    }

    #[test]
    fn test_missing_value_and_unterminated_quote() {
        assert_eq!(parse_attributes("a="), pairs(&[("a", Some(""))]));
        assert_eq!(parse_attributes("a=\"x y"), pairs(&[("a", Some("x y"))]));
    }

    #[test]
    fn test_names_lowercased_first_wins() {
        assert_eq!(
            parse_attributes("ID=one id=two"),
            pairs(&[("id", Some("one"))])
        );
    }

    #[test]
    fn test_empty_signature() {
        assert!(parse_attributes("   ").is_empty());
    }
}
