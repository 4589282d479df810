use cap_ir::TokenKind::{ExprClose, ExprOpen, Int, Minus, Text};
use pretty_assertions::assert_eq;

use crate::common::{lex, lex_error};

#[test]
fn negative_literal_is_two_tokens() {
    assert_eq!(lex("{: -123 :}"), vec![ExprOpen, Minus, Int(123), ExprClose]);
}

#[test]
fn empty_input_has_no_tokens() {
    assert!(lex("").is_empty());
}

#[test]
fn text_is_kept_verbatim() {
    assert_eq!(lex("a  b\tc"), vec![Text("a  b\tc".to_string())]);
}

#[test]
fn single_at_is_rejected() {
    assert_eq!(lex_error("{@@"), "invalid syntax. single '@' is not supported");
}

#[test]
fn unclosed_region_is_rejected() {
    assert_eq!(lex_error("{@ x = 1"), "not closed by block");
}
