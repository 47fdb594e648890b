//! Integration tests for the markup parser.

use vision_markup::{
    DEFAULT_MAX_DEPTH, Element, ElementTree, MarkupError, NodeId, ParseError, Parser, Token,
    TokenKind, parse, parse_document, tokenize,
};
use vision_common::warning::has_warned;

/// Helper to parse markup that must be valid
fn parse_ok(markup: &str) -> ElementTree {
    parse_document(markup).expect("markup should parse")
}

/// Helper to parse markup that must be rejected by the parser
fn parse_err(markup: &str) -> ParseError {
    let tokens = tokenize(markup).expect("markup should tokenize");
    parse(tokens).expect_err("markup should not parse")
}

/// Helper to get a child element by position
fn child(tree: &ElementTree, parent: NodeId, index: usize) -> &Element {
    let id = tree.children(parent)[index];
    tree.get(id).expect("child should exist")
}

#[test]
fn test_root_name_is_first_tag() {
    let tree = parse_ok("<html><body></body></html>");
    assert_eq!(tree.root(), NodeId::ROOT);
    assert_eq!(tree.root_element().name(), "html");
    assert_eq!(tree.root_element().parent(), None);
}

#[test]
fn test_attributes() {
    let tree = parse_ok(r#"<div id="x" class="y"></div>"#);
    let div = tree.root_element();

    assert_eq!(div.attributes().len(), 2);
    assert_eq!(div.get_attribute("id"), Some("x"));
    assert_eq!(div.get_attribute("class"), Some("y"));
    assert!(div.has_attribute("id"));
    assert!(!div.has_attribute("style"));
    assert_eq!(div.get_attribute("style"), None);
    assert!(div.children().is_empty());
    assert_eq!(div.inner_text(), "");
}

#[test]
fn test_self_closing_root() {
    let tree = parse_ok(r#"<img src="p.png"/>"#);
    let img = tree.root_element();

    assert_eq!(img.name(), "img");
    assert_eq!(img.attributes().len(), 1);
    assert_eq!(img.get_attribute("src"), Some("p.png"));
    assert!(img.children().is_empty());
    assert_eq!(img.inner_text(), "");
    assert!(img.is_self_closing());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_self_closing_child_consumes_no_closing_tag() {
    let tree = parse_ok(r#"<p>before<br/>after<img src="a.png"/></p>"#);
    let p = tree.root_element();

    assert_eq!(p.children().len(), 2);
    assert_eq!(p.inner_text(), "beforeafter");
    let br = child(&tree, tree.root(), 0);
    assert_eq!(br.name(), "br");
    assert!(br.is_self_closing());
    assert!(!p.is_self_closing());
}

#[test]
fn test_text_is_trimmed_and_collapsed() {
    let tree = parse_ok("<p>  hello   world  </p>");
    assert_eq!(tree.root_element().inner_text(), "hello world");
}

#[test]
fn test_text_runs_concatenate_around_children() {
    let tree = parse_ok("<p>one <b>two</b> three</p>");
    let p = tree.root_element();

    assert_eq!(p.inner_text(), "onethree");
    assert_eq!(child(&tree, tree.root(), 0).inner_text(), "two");
}

#[test]
fn test_nesting_depth_preserved() {
    let tree = parse_ok("<a><b><c></c></b></a>");
    assert_eq!(tree.len(), 3);

    let a = tree.root();
    assert_eq!(tree.children(a).len(), 1);
    let b = tree.children(a)[0];
    assert_eq!(tree.get(b).map(Element::name), Some("b"));
    assert_eq!(tree.children(b).len(), 1);
    let c = tree.children(b)[0];
    assert_eq!(tree.get(c).map(Element::name), Some("c"));
    assert!(tree.children(c).is_empty());

    assert_eq!(tree.parent(c), Some(b));
    assert_eq!(tree.parent(b), Some(a));
    assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![b, a]);
}

#[test]
fn test_children_in_document_order() {
    let tree = parse_ok("<ul><li>1</li><li>2</li><li>3</li></ul>");
    let texts: Vec<&str> = tree
        .children(tree.root())
        .iter()
        .filter_map(|&id| tree.get(id))
        .map(Element::inner_text)
        .collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
}

#[test]
fn test_multiline_document() {
    let markup = r#"
<window title="Main" width="800">
    <label text="Hello"/>
    <panel>
        Some text
        spanning lines
        <button id="ok">OK</button>
    </panel>
</window>
"#;
    let tree = parse_ok(markup);
    let window = tree.root_element();
    assert_eq!(window.name(), "window");
    assert_eq!(window.get_attribute("width"), Some("800"));
    assert_eq!(window.children().len(), 2);

    let panel = child(&tree, tree.root(), 1);
    assert_eq!(panel.inner_text(), "Some text spanning lines");
    assert_eq!(panel.children().len(), 1);
}

#[test]
fn test_duplicate_attribute_last_wins() {
    let tokens = tokenize(r#"<a k="1" k="2"></a>"#).unwrap();
    let (tree, issues) = Parser::new(tokens).run_with_issues().unwrap();

    assert_eq!(tree.root_element().get_attribute("k"), Some("2"));
    assert_eq!(tree.root_element().attributes().len(), 1);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("'k'"));
}

#[test]
fn test_parsing_leaves_warnings_untouched() {
    for i in 0..3 {
        let markup = format!(r#"<a k{i}="1" k{i}="2"></a>"#);
        let tree = parse_document(&markup).unwrap();
        assert_eq!(tree.root_element().get_attribute(&format!("k{i}")), Some("2"));

        let message = format!("duplicate attribute 'k{i}' on <a>, last value wins");
        assert!(!has_warned("Parser", &message));
    }
}

#[test]
fn test_clean_document_has_no_issues() {
    let tokens = tokenize(r#"<a k="1"><b/></a>"#).unwrap();
    let (_, issues) = Parser::new(tokens).run_with_issues().unwrap();
    assert!(issues.is_empty());
}

#[test]
fn test_tag_names_are_case_sensitive() {
    assert_eq!(
        parse_err("<a></A>"),
        ParseError::TagMismatch {
            open: "a".to_string(),
            close: "A".to_string(),
            offset: 5,
        }
    );
}

#[test]
fn test_mismatched_closing_tag() {
    match parse_err("<a><b></a></a>") {
        ParseError::TagMismatch { open, close, .. } => {
            assert_eq!(open, "b");
            assert_eq!(close, "a");
        }
        other => panic!("Expected TagMismatch, got {other:?}"),
    }
}

#[test]
fn test_unclosed_elements_are_rejected() {
    assert_eq!(
        parse_err("<a><b>"),
        ParseError::UnexpectedEndOfInput {
            expected: TokenKind::CloseTagStart,
        }
    );
}

#[test]
fn test_missing_equals() {
    assert_eq!(
        parse_err(r#"<a b "c"></a>"#),
        ParseError::UnexpectedToken {
            expected: TokenKind::Equals,
            found: TokenKind::QuotedString,
            offset: 5,
        }
    );
}

#[test]
fn test_unquoted_attribute_value() {
    assert_eq!(
        parse_err("<a b=c></a>"),
        ParseError::UnexpectedToken {
            expected: TokenKind::QuotedString,
            found: TokenKind::Identifier,
            offset: 5,
        }
    );
}

#[test]
fn test_missing_tag_name() {
    assert!(matches!(
        parse_err("<>"),
        ParseError::UnexpectedToken {
            expected: TokenKind::Identifier,
            found: TokenKind::TagEnd,
            ..
        }
    ));
}

#[test]
fn test_document_must_start_with_tag() {
    assert!(matches!(
        parse_err("hello <a></a>"),
        ParseError::UnexpectedToken {
            expected: TokenKind::OpenTagStart,
            found: TokenKind::Identifier,
            offset: 0,
        }
    ));
}

#[test]
fn test_empty_document() {
    assert_eq!(
        parse_err(""),
        ParseError::UnexpectedEndOfInput {
            expected: TokenKind::OpenTagStart,
        }
    );
}

#[test]
fn test_second_root_is_rejected() {
    assert!(matches!(
        parse_err("<a></a><b></b>"),
        ParseError::UnexpectedToken {
            expected: TokenKind::EndOfFile,
            found: TokenKind::OpenTagStart,
            ..
        }
    ));
}

#[test]
fn test_text_after_root_is_rejected() {
    assert!(matches!(
        parse_err("<a></a> trailing"),
        ParseError::UnexpectedToken {
            expected: TokenKind::EndOfFile,
            found: TokenKind::TextContent,
            ..
        }
    ));
}

#[test]
fn test_trailing_whitespace_after_root_is_fine() {
    let tree = parse_ok("<a></a>\n\n");
    assert_eq!(tree.root_element().name(), "a");
}

#[test]
fn test_closing_tag_missing_end() {
    assert!(matches!(
        parse_err("<a></a </a>"),
        ParseError::UnexpectedToken {
            expected: TokenKind::TagEnd,
            found: TokenKind::CloseTagStart,
            ..
        }
    ));
}

#[test]
fn test_stray_equals_in_children() {
    // `=` ends the children loop, so a closing tag is expected there.
    assert_eq!(
        Parser::new(vec![
            Token::new(TokenKind::OpenTagStart, "<", 0),
            Token::new(TokenKind::Identifier, "a", 1),
            Token::new(TokenKind::TagEnd, ">", 2),
            Token::new(TokenKind::Equals, "=", 3),
        ])
        .run(),
        Err(ParseError::UnexpectedToken {
            expected: TokenKind::CloseTagStart,
            found: TokenKind::Equals,
            offset: 3,
        })
    );
}

#[test]
fn test_token_stream_without_eof_is_safe() {
    let tokens = vec![
        Token::new(TokenKind::OpenTagStart, "<", 0),
        Token::new(TokenKind::Identifier, "a", 1),
    ];
    assert_eq!(
        parse(tokens),
        Err(ParseError::UnexpectedEndOfInput {
            expected: TokenKind::TagEnd,
        })
    );
}

#[test]
fn test_max_depth() {
    let tokens = tokenize("<a><b><c></c></b></a>").unwrap();
    assert!(Parser::new(tokens.clone()).with_max_depth(3).run().is_ok());

    match Parser::new(tokens).with_max_depth(2).run() {
        Err(ParseError::NestingTooDeep { limit, offset }) => {
            assert_eq!(limit, 2);
            assert_eq!(offset, 6);
        }
        other => panic!("Expected NestingTooDeep, got {other:?}"),
    }
}

#[test]
fn test_default_max_depth_allows_deep_documents() {
    let depth = DEFAULT_MAX_DEPTH;
    let markup = format!("{}{}", "<d>".repeat(depth), "</d>".repeat(depth));
    let tree = parse_ok(&markup);
    assert_eq!(tree.len(), depth);

    let too_deep = format!("{}{}", "<d>".repeat(depth + 1), "</d>".repeat(depth + 1));
    assert!(matches!(
        parse_document(&too_deep),
        Err(MarkupError::Parse(ParseError::NestingTooDeep { .. }))
    ));
}

#[test]
fn test_parse_document_reports_lex_errors() {
    assert!(matches!(
        parse_document(r#"<a b="oops></a>"#),
        Err(MarkupError::Lex(_))
    ));
}

#[test]
fn test_tree_display() {
    let tree = parse_ok(r#"<a z="1" b="2">text<c/><d>inner</d></a>"#);
    let expected = "\
<a b=\"2\" z=\"1\">
  \"text\"
  <c/>
  <d>
    \"inner\"
";
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse_err("<a></b>").to_string(),
        "tag mismatch: <a> closed by </b> at byte 5"
    );
    assert_eq!(
        parse_err("<a>").to_string(),
        "unexpected end of input, expected CloseTagStart"
    );
}
