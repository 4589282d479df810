use super::*;
use pretty_assertions::assert_eq;

fn tokens(source: &str) -> TokenList {
    cap_lexer::scan(source).unwrap()
}

#[test]
fn test_cursor_navigation() {
    let tokens = tokens("{@ a = 1 @}");
    let mut cursor = Cursor::new(&tokens);

    assert!(cursor.check(&TokenKind::StmtOpen));
    cursor.advance();
    assert_eq!(cursor.eat_ident().map(|i| i.name), Some("a".to_string()));
    assert!(cursor.eat(&TokenKind::Assign));
    assert!(!cursor.eat(&TokenKind::Assign));
    assert_eq!(cursor.current_kind(), Some(&TokenKind::Int(1)));
    cursor.advance();
    cursor.advance();
    assert!(cursor.is_at_end());
    assert_eq!(cursor.current(), None);
}

#[test]
fn test_position_round_trip() {
    let tokens = tokens("{@ a b @}");
    let mut cursor = Cursor::new(&tokens);
    cursor.advance();
    let saved = cursor.position();
    cursor.advance();
    cursor.advance();
    cursor.set_position(saved);
    assert_eq!(cursor.eat_ident().map(|i| i.name), Some("a".to_string()));
}

#[test]
fn test_skip_newlines() {
    let tokens = tokens("{@\n\n\na @}");
    let mut cursor = Cursor::new(&tokens);
    cursor.advance();
    cursor.skip_newlines();
    assert!(matches!(cursor.current_kind(), Some(TokenKind::Ident(_))));
}

#[test]
fn test_span_at_end_points_past_last_token() {
    let tokens = tokens("{: x :}");
    let mut cursor = Cursor::new(&tokens);
    while cursor.advance().is_some() {}
    assert_eq!(cursor.previous_span(), Span::new(5, 7));
    assert_eq!(cursor.current_span(), Span::point(7));
}
