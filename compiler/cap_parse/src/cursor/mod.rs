//! Token cursor for navigating the token stream.
//!
//! The token list has no end marker, so every accessor that looks at the
//! current token returns an `Option`; `None` means end of input.

use cap_ir::{Ident, Span, Token, TokenKind, TokenList};

/// Cursor for navigating tokens.
///
/// Rules that may need to back out record [`position`](Cursor::position)
/// before consuming anything and hand it back to
/// [`set_position`](Cursor::set_position) when the construct turns out not
/// to match.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Roll back to a position previously returned by [`position`](Cursor::position).
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.tokens.len(),
            "cursor position {} out of bounds (max {})",
            pos,
            self.tokens.len()
        );
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> Option<&'a TokenKind> {
        self.current().map(|t| &t.kind)
    }

    /// Span of the current token, or an empty span just past the last
    /// token when at the end.
    pub fn current_span(&self) -> Span {
        match self.current() {
            Some(token) => token.span,
            None => Span::point(self.previous_span().end),
        }
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if the current token is exactly `kind`.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an identifier token.
    pub fn eat_ident(&mut self) -> Option<Ident> {
        let token = self.current()?;
        let TokenKind::Ident(name) = &token.kind else {
            return None;
        };
        self.pos += 1;
        Some(Ident::new(name.clone(), token.span))
    }

    pub fn skip_newlines(&mut self) {
        while self.eat(&TokenKind::Newline) {}
    }
}

#[cfg(test)]
mod tests;
