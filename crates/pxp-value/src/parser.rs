use crate::node::{Value, ValueNode};
use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

/// CSS value parser.
///
/// Tokenizes a single declaration value (`red 2pxp solid`, `calc(1px + 2px)`)
/// with `cssparser` and builds a [`ValueNode`] tree from the tokens.
///
/// Every node is built from the token's source slice rather than its
/// unescaped value, so `parse(s).to_string() == s`. Parsing never fails:
/// unterminated strings, comments and functions are flagged as `unclosed`.
pub struct ValueParser;

impl ValueParser {
    /// Parse a value string into a node tree.
    pub fn parse(source: &str) -> Value {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        Value::new(parse_nodes(&mut parser))
    }
}

/// Parse tokens until the end of the current block.
fn parse_nodes<'i>(parser: &mut Parser<'i, '_>) -> Vec<ValueNode> {
    let mut nodes = Vec::new();

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let node = match token {
            Token::WhiteSpace(space) => ValueNode::Space(space.to_string()),
            Token::Comma => divider(parser, &mut nodes, ','),
            Token::Colon => divider(parser, &mut nodes, ':'),
            Token::Delim('/') => divider(parser, &mut nodes, '/'),
            Token::Comment(_) => comment(parser.slice_from(start)),
            Token::QuotedString(_) => quoted_string(parser.slice_from(start)),
            Token::Dimension { .. } => dimension(parser.slice_from(start), &token),
            Token::UnquotedUrl(_) => raw_url(parser.slice_from(start)),
            Token::Function(_) => {
                let head = parser.slice_from(start);
                let name = head.strip_suffix('(').unwrap_or(head).to_string();
                block(parser, name, start)
            }
            Token::ParenthesisBlock => block(parser, String::new(), start),
            Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                // Consume the block so its text lands in this word
                let _ = parser.parse_nested_block(|nested| {
                    while nested.next_including_whitespace_and_comments().is_ok() {}
                    Ok::<_, ParseError<'i, ()>>(())
                });
                ValueNode::Word(parser.slice_from(start).to_string())
            }
            _ => ValueNode::Word(parser.slice_from(start).to_string()),
        };

        nodes.push(node);
    }

    nodes
}

// --- Node builders ---

/// A divider takes the whitespace on either side of it.
fn divider(parser: &mut Parser<'_, '_>, nodes: &mut Vec<ValueNode>, value: char) -> ValueNode {
    let before = match nodes.last() {
        Some(ValueNode::Space(_)) => match nodes.pop() {
            Some(ValueNode::Space(space)) => space,
            _ => String::new(),
        },
        _ => String::new(),
    };

    let state = parser.state();
    let after = match parser.next_including_whitespace_and_comments() {
        Ok(Token::WhiteSpace(space)) => Some(space.to_string()),
        _ => None,
    };
    let after = after.unwrap_or_else(|| {
        parser.reset(&state);
        String::new()
    });

    ValueNode::Div {
        value,
        before,
        after,
    }
}

/// A function or bare parenthesized group. The opening token has been
/// consumed; `start` is where it began.
fn block(parser: &mut Parser<'_, '_>, name: String, start: SourcePosition) -> ValueNode {
    let head_len = parser.slice_from(start).len();
    let mut inner_len = 0;

    let mut nodes = parser
        .parse_nested_block(|nested| {
            let inner_start = nested.position();
            let nodes = parse_nodes(nested);
            inner_len = nested.slice_from(inner_start).len();
            Ok::<_, ParseError<'_, ()>>(nodes)
        })
        .unwrap_or_default();

    // No `)` consumed past the body means the block ran to end of input
    let unclosed = parser.slice_from(start).len() == head_len + inner_len;

    let before = match nodes.first() {
        Some(ValueNode::Space(_)) => match nodes.remove(0) {
            ValueNode::Space(space) => space,
            _ => String::new(),
        },
        _ => String::new(),
    };
    let after = match nodes.last() {
        Some(ValueNode::Space(_)) => match nodes.pop() {
            Some(ValueNode::Space(space)) => space,
            _ => String::new(),
        },
        _ => String::new(),
    };

    ValueNode::Function {
        name,
        before,
        after,
        nodes,
        unclosed,
    }
}

fn dimension(raw: &str, token: &Token<'_>) -> ValueNode {
    let Token::Dimension { unit, .. } = token else {
        return ValueNode::Word(raw.to_string());
    };

    let unit: &str = unit;

    // An escaped unit does not spell itself in the source; keep it whole
    match raw.strip_suffix(unit) {
        Some(number) if !number.is_empty() => ValueNode::dimension(number, unit),
        _ => ValueNode::Word(raw.to_string()),
    }
}

fn quoted_string(raw: &str) -> ValueNode {
    let mut chars = raw.chars();
    let Some(quote) = chars.next() else {
        return ValueNode::Word(String::new());
    };
    let body = chars.as_str();

    match body.strip_suffix(quote) {
        Some(value) if !ends_with_escape(value) => ValueNode::Str {
            quote,
            value: value.to_string(),
            unclosed: false,
        },
        _ => ValueNode::Str {
            quote,
            value: body.to_string(),
            unclosed: true,
        },
    }
}

/// Whether `text` ends in an odd number of backslashes.
fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn comment(raw: &str) -> ValueNode {
    let body = raw.strip_prefix("/*").unwrap_or(raw);
    match body.strip_suffix("*/") {
        Some(value) => ValueNode::Comment {
            value: value.to_string(),
            unclosed: false,
        },
        None => ValueNode::Comment {
            value: body.to_string(),
            unclosed: true,
        },
    }
}

/// `url(...)` with an unquoted argument arrives as one token. Its argument
/// stays one raw word, since URLs may contain `/`, `:` and `,`.
fn raw_url(raw: &str) -> ValueNode {
    let Some((name, rest)) = raw.split_once('(') else {
        return ValueNode::Word(raw.to_string());
    };
    let (body, unclosed) = match rest.strip_suffix(')') {
        Some(body) => (body, false),
        None => (rest, true),
    };

    let trimmed = body.trim_start();
    let before = &body[..body.len() - trimmed.len()];
    let argument = trimmed.trim_end();
    let after = &trimmed[argument.len()..];

    let nodes = if argument.is_empty() {
        Vec::new()
    } else {
        vec![ValueNode::word(argument)]
    };

    ValueNode::Function {
        name: name.to_string(),
        before: before.to_string(),
        after: after.to_string(),
        nodes,
        unclosed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nodes(source: &str) -> Vec<ValueNode> {
        ValueParser::parse(source).nodes
    }

    fn roundtrip(source: &str) {
        assert_eq!(ValueParser::parse(source).to_string(), source);
    }

    // =========================================================================
    // Words, dimensions and spaces
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert_eq!(nodes(""), vec![]);
    }

    #[test]
    fn test_single_dimension() {
        assert_eq!(nodes("100pxp"), vec![ValueNode::dimension("100", "pxp")]);
    }

    #[test]
    fn test_dimension_keeps_number_spelling() {
        assert_eq!(nodes("-1.5e2px"), vec![ValueNode::dimension("-1.5e2", "px")]);
        assert_eq!(nodes("+.5pxp"), vec![ValueNode::dimension("+.5", "pxp")]);
    }

    #[test]
    fn test_words_and_spaces() {
        assert_eq!(
            nodes("red 2pxp  solid"),
            vec![
                ValueNode::word("red"),
                ValueNode::space(),
                ValueNode::dimension("2", "pxp"),
                ValueNode::Space("  ".into()),
                ValueNode::word("solid"),
            ]
        );
    }

    #[test]
    fn test_bare_unit_is_word() {
        assert_eq!(nodes("pxp"), vec![ValueNode::word("pxp")]);
        assert_eq!(nodes("50%"), vec![ValueNode::word("50%")]);
    }

    #[test]
    fn test_leading_and_trailing_space() {
        assert_eq!(
            nodes(" 1px "),
            vec![
                ValueNode::space(),
                ValueNode::dimension("1", "px"),
                ValueNode::space(),
            ]
        );
    }

    #[test]
    fn test_stray_close_paren_is_word() {
        assert_eq!(
            nodes("a)b"),
            vec![
                ValueNode::word("a"),
                ValueNode::word(")"),
                ValueNode::word("b"),
            ]
        );
    }

    // =========================================================================
    // Dividers
    // =========================================================================

    #[test]
    fn test_comma_absorbs_whitespace() {
        assert_eq!(
            nodes("a , b"),
            vec![
                ValueNode::word("a"),
                ValueNode::Div {
                    value: ',',
                    before: " ".into(),
                    after: " ".into(),
                },
                ValueNode::word("b"),
            ]
        );
    }

    #[test]
    fn test_slash_divider() {
        assert_eq!(
            nodes("1pxp/2pxp"),
            vec![
                ValueNode::dimension("1", "pxp"),
                ValueNode::Div {
                    value: '/',
                    before: String::new(),
                    after: String::new(),
                },
                ValueNode::dimension("2", "pxp"),
            ]
        );
    }

    // =========================================================================
    // Functions
    // =========================================================================

    #[test]
    fn test_function() {
        assert_eq!(
            nodes("translate(1pxp, 2px)"),
            vec![ValueNode::Function {
                name: "translate".into(),
                before: String::new(),
                after: String::new(),
                nodes: vec![
                    ValueNode::dimension("1", "pxp"),
                    ValueNode::Div {
                        value: ',',
                        before: String::new(),
                        after: " ".into(),
                    },
                    ValueNode::dimension("2", "px"),
                ],
                unclosed: false,
            }]
        );
    }

    #[test]
    fn test_function_inner_padding() {
        assert_eq!(
            nodes("var( --x )"),
            vec![ValueNode::Function {
                name: "var".into(),
                before: " ".into(),
                after: " ".into(),
                nodes: vec![ValueNode::word("--x")],
                unclosed: false,
            }]
        );
    }

    #[test]
    fn test_nested_functions() {
        let parsed = nodes("calc(1px + max(2px, 3pxp))");
        let ValueNode::Function { nodes: inner, .. } = &parsed[0] else {
            panic!("expected function, got {:?}", parsed[0]);
        };
        assert_eq!(inner.len(), 5);
        assert!(matches!(&inner[4], ValueNode::Function { name, .. } if name == "max"));
    }

    #[test]
    fn test_bare_parens() {
        let parsed = nodes("(1px)");
        assert!(matches!(&parsed[0], ValueNode::Function { name, .. } if name.is_empty()));
    }

    #[test]
    fn test_unclosed_function() {
        let parsed = nodes("calc(1px");
        assert!(matches!(&parsed[0], ValueNode::Function { unclosed: true, .. }));
    }

    #[test]
    fn test_inner_close_is_not_outer_close() {
        let parsed = nodes("f(g()");
        assert!(matches!(&parsed[0], ValueNode::Function { unclosed: true, .. }));
    }

    #[test]
    fn test_unquoted_url_is_one_word() {
        assert_eq!(
            nodes("url(http://a.b/c,d.png)"),
            vec![ValueNode::Function {
                name: "url".into(),
                before: String::new(),
                after: String::new(),
                nodes: vec![ValueNode::word("http://a.b/c,d.png")],
                unclosed: false,
            }]
        );
    }

    #[test]
    fn test_quoted_url_is_string() {
        let parsed = nodes("url('a.png')");
        let ValueNode::Function { nodes: inner, .. } = &parsed[0] else {
            panic!("expected function");
        };
        assert_eq!(
            inner,
            &vec![ValueNode::Str {
                quote: '\'',
                value: "a.png".into(),
                unclosed: false,
            }]
        );
    }

    // =========================================================================
    // Strings and comments
    // =========================================================================

    #[test]
    fn test_string_with_escape() {
        assert_eq!(
            nodes(r#""a\"b""#),
            vec![ValueNode::Str {
                quote: '"',
                value: r#"a\"b"#.into(),
                unclosed: false,
            }]
        );
    }

    #[test]
    fn test_unclosed_string() {
        assert_eq!(
            nodes("'abc"),
            vec![ValueNode::Str {
                quote: '\'',
                value: "abc".into(),
                unclosed: true,
            }]
        );
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            nodes("/* 2pxp */"),
            vec![ValueNode::Comment {
                value: " 2pxp ".into(),
                unclosed: false,
            }]
        );
    }

    // =========================================================================
    // Lossless serialization
    // =========================================================================

    #[test]
    fn test_roundtrip_preserves_source() {
        roundtrip("red 2pxp solid");
        roundtrip("  1px\t,\n2px  ");
        roundtrip("calc( 100% - var(--gap , 4px) )");
        roundtrip("url( a/b.png )");
        roundtrip("'unterminated");
        roundtrip("rgba(0 0 0 / 50%");
        roundtrip("a /* note */ b");
        roundtrip("/* open");
        roundtrip("[a b] {c}");
        roundtrip("\"é\" ✓ 10pxp");
    }
}
