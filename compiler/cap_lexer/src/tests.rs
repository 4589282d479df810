use cap_ir::TokenKind::{self, *};
use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).unwrap().kinds()
}

fn error(source: &str) -> String {
    scan(source).unwrap_err().message()
}

fn ident(name: &str) -> TokenKind {
    Ident(name.to_string())
}

fn text(value: &str) -> TokenKind {
    Text(value.to_string())
}

#[test]
fn test_empty_input() {
    assert!(scan("").unwrap().is_empty());
}

#[test]
fn test_text_only() {
    assert_eq!(kinds("hello world"), vec![text("hello world")]);
}

#[test]
fn test_trailing_newline_is_dropped() {
    assert_eq!(kinds("abc\n"), vec![text("abc")]);
    assert_eq!(kinds("abc\r\n"), vec![text("abc")]);
    assert_eq!(kinds("a\nb\n"), vec![text("a\nb")]);
    assert_eq!(kinds("a\r\nb"), vec![text("a\r\nb")]);
}

#[test]
fn test_regions_split_text() {
    assert_eq!(
        kinds("a{@ x @}b{: y :}c"),
        vec![
            text("a"),
            StmtOpen,
            ident("x"),
            StmtClose,
            text("b"),
            ExprOpen,
            ident("y"),
            ExprClose,
            text("c"),
        ]
    );
}

#[test]
fn test_keywords_and_operators() {
    assert_eq!(
        kinds("{@ def f() extends g: return a += 1 end @}"),
        vec![
            StmtOpen, Def, ident("f"), LParen, RParen, Extends, ident("g"), Colon, Return,
            ident("a"), PlusAssign, Int(1), End, StmtClose,
        ]
    );
    assert_eq!(
        kinds("{@ == != <= >= < > -= *= /= %= ; . , [ ] { } @}"),
        vec![
            StmtOpen, EqEq, NotEq, LtEq, GtEq, Lt, Gt, MinusAssign, StarAssign, SlashAssign,
            PercentAssign, Semicolon, Dot, Comma, LBracket, RBracket, LBrace, RBrace, StmtClose,
        ]
    );
}

#[test]
fn test_negative_integer_is_two_tokens() {
    assert_eq!(kinds("{@ -123 @}"), vec![StmtOpen, Minus, Int(123), StmtClose]);
}

#[test]
fn test_newlines_in_regions() {
    assert_eq!(
        kinds("{@\r\na\rb\nc@}"),
        vec![StmtOpen, Newline, ident("a"), Newline, ident("b"), Newline, ident("c"), StmtClose]
    );
}

#[test]
fn test_comments() {
    assert_eq!(
        kinds("{@ a // note\n /* multi\nline */ b @}"),
        vec![StmtOpen, ident("a"), Newline, ident("b"), StmtClose]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        kinds(r#"{: "a\tb\n\"q\"\x" :}"#),
        vec![ExprOpen, Str("a\tb\n\"q\"\\x".to_string()), ExprClose]
    );
}

#[test]
fn test_colon_inside_expression_region() {
    assert_eq!(
        kinds("{: {\"k\": 1} :}"),
        vec![ExprOpen, LBrace, Str("k".into()), Colon, Int(1), RBrace, ExprClose]
    );
}

#[test]
fn test_single_at_is_rejected() {
    assert_eq!(error("{@@"), "invalid syntax. single '@' is not supported");
}

#[test]
fn test_unclosed_regions() {
    assert_eq!(error("{@ a = 1"), "not closed by block");
    assert_eq!(error("{: a"), "not closed by block");
    assert_eq!(error("{@ /* open"), "not closed by block");
}

#[test]
fn test_unsupported_character() {
    assert_eq!(error("{@ a $ b @}"), "syntax error. unsupported character \"$\"");
    assert_eq!(error("{: a ! :}"), "syntax error. unsupported character \"!\"");
}

#[test]
fn test_unterminated_string() {
    assert_eq!(error("{@ \"abc"), "not closed by double quote");
}

#[test]
fn test_integer_too_large() {
    assert_eq!(error("{@ 99999999999999999999 @}"), "integer literal is too large");
}

#[test]
fn test_rescan_clears_previous_tokens() {
    let mut tokens = scan("{@ a @}").unwrap();
    scan_into("xyz", &mut tokens).unwrap();
    assert_eq!(tokens.kinds(), vec![text("xyz")]);
}

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = scan("ab{: x :}").unwrap();
    assert_eq!(tokens[0].span, cap_ir::Span::new(0, 2));
    assert_eq!(tokens[1].span, cap_ir::Span::new(2, 4));
    assert_eq!(tokens[2].span, cap_ir::Span::new(5, 6));
    assert_eq!(tokens[3].span, cap_ir::Span::new(7, 9));
}

mod proptest_scanner {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn text_without_delimiters_is_one_token(input in "[a-zA-Z0-9 .,!?@:{}\n]{0,64}") {
            prop_assume!(!input.contains("{@") && !input.contains("{:"));
            let body = input.strip_suffix('\n').unwrap_or(&input);
            let expected = if body.is_empty() {
                vec![]
            } else {
                vec![Text(body.to_string())]
            };
            prop_assert_eq!(scan(&input).unwrap().kinds(), expected);
        }

        #[test]
        fn integer_literals_round_trip(n in 0..=i64::MAX) {
            let source = format!("{{@ {n} @}}");
            prop_assert_eq!(scan(&source).unwrap().kinds(), vec![StmtOpen, Int(n), StmtClose]);
        }

        #[test]
        fn negative_literals_are_two_tokens(n in 0..=i64::MAX) {
            let source = format!("{{: -{n} :}}");
            prop_assert_eq!(
                scan(&source).unwrap().kinds(),
                vec![ExprOpen, Minus, Int(n), ExprClose]
            );
        }
    }
}
