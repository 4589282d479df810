//! Factors and atoms: parenthesized formulas, literals, identifiers,
//! arrays and dicts.

use cap_ir::{DictElem, Expr, ExprKind, TokenKind};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    /// `"(" formula ")" | atom`
    pub(crate) fn parse_factor(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::LParen) {
            return self.parse_atom();
        }
        self.cursor.skip_newlines();
        let Some(formula) = self.parse_formula()? else {
            return syntax_error!(self, "syntax error. not found content of ( )");
        };
        self.cursor.skip_newlines();
        if !self.cursor.eat(&TokenKind::RParen) {
            return syntax_error!(self, "syntax error. not found ) in factor");
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Some(Expr::new(ExprKind::Group(Box::new(formula)), span)))
    }

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.cursor.current() else {
            return Ok(None);
        };
        let kind = match &token.kind {
            TokenKind::Nil => ExprKind::Nil,
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Int(value) => ExprKind::Int(*value),
            TokenKind::Str(value) => ExprKind::Str(value.clone()),
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::LBracket => return self.parse_array().map(Some),
            TokenKind::LBrace => return self.parse_dict().map(Some),
            _ => return Ok(None),
        };
        self.cursor.advance();
        Ok(Some(Expr::new(kind, token.span)))
    }

    /// `"[" (simple_assign ("," simple_assign)* [","])? "]"`
    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        const EOF: &str = "reached EOF in compile array";
        let start = self.cursor.current_span();
        self.cursor.advance();

        let mut elems = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.is_at_end() {
                return syntax_error!(self, EOF);
            }
            if self.cursor.check(&TokenKind::RBracket) {
                break;
            }
            let Some(elem) = self.parse_simple_assign()? else {
                return syntax_error!(self, "not found ']' in array");
            };
            elems.push(elem);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }

        if self.cursor.is_at_end() {
            return syntax_error!(self, EOF);
        }
        if !self.cursor.eat(&TokenKind::RBracket) {
            return syntax_error!(self, "not found ']' in array");
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Array(elems), span))
    }

    /// `"{" (key ":" value ("," key ":" value)* [","])? "}"`
    ///
    /// A key written as a literal of any type but string is rejected here.
    /// Other keys are checked when the dict is built.
    fn parse_dict(&mut self) -> Result<Expr, ParseError> {
        const EOF: &str = "reached EOF in dict";
        let start = self.cursor.current_span();
        self.cursor.advance();

        let mut elems = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.is_at_end() {
                return syntax_error!(self, EOF);
            }
            if self.cursor.check(&TokenKind::RBrace) {
                break;
            }
            elems.push(self.parse_dict_elem()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }

        if self.cursor.is_at_end() {
            return syntax_error!(self, EOF);
        }
        if !self.cursor.eat(&TokenKind::RBrace) {
            return syntax_error!(self, "not found right brace in parse dict");
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Dict(elems), span))
    }

    fn parse_dict_elem(&mut self) -> Result<DictElem, ParseError> {
        let key_start = self.cursor.position();
        let Some(key) = self.parse_simple_assign()? else {
            return syntax_error!(self, "not found key in parse dict elem");
        };
        if key.targets.is_empty() && is_non_string_literal(&key.value.kind) {
            self.cursor.set_position(key_start);
            return syntax_error!(self, "key is not string in dict elem");
        }

        self.cursor.skip_newlines();
        if !self.cursor.eat(&TokenKind::Colon) {
            return syntax_error!(self, "not found colon in parse dict elem");
        }
        self.cursor.skip_newlines();
        let Some(value) = self.parse_simple_assign()? else {
            return syntax_error!(self, "not found value in parse dict elem");
        };
        Ok(DictElem { key, value })
    }
}

fn is_non_string_literal(kind: &ExprKind) -> bool {
    matches!(
        kind,
        ExprKind::Nil
            | ExprKind::Bool(_)
            | ExprKind::Int(_)
            | ExprKind::Array(_)
            | ExprKind::Dict(_)
    )
}
