//! Postfix chains: `.name`, `[index]`, `(args)`.

use cap_ir::{ChainOp, Expr, ExprKind, TokenKind};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    /// `factor ("." ident | "[" simple_assign "]" | "(" call_args ")")*`
    pub(crate) fn parse_chain(&mut self) -> ParseResult<Expr> {
        let Some(base) = self.parse_factor()? else {
            return Ok(None);
        };

        let mut ops = Vec::new();
        let mut span = base.span;
        loop {
            let op_start = self.cursor.current_span();
            let op = match self.cursor.current_kind() {
                Some(TokenKind::Dot) => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        return syntax_error!(self, "reached EOF after '.'");
                    }
                    let Some(name) = self.cursor.eat_ident() else {
                        return syntax_error!(self, "not found identifier after '.'");
                    };
                    ChainOp::Dot(name)
                }
                Some(TokenKind::LBracket) => {
                    self.cursor.advance();
                    self.cursor.skip_newlines();
                    if self.cursor.is_at_end() {
                        return syntax_error!(self, "reached EOF after '['");
                    }
                    let Some(index) = self.parse_simple_assign()? else {
                        return syntax_error!(self, "not found expression");
                    };
                    self.cursor.skip_newlines();
                    if !self.cursor.eat(&TokenKind::RBracket) {
                        return syntax_error!(self, "not found ']'");
                    }
                    ChainOp::Index(Box::new(index), op_start.merge(self.cursor.previous_span()))
                }
                Some(TokenKind::LParen) => {
                    self.cursor.advance();
                    self.cursor.skip_newlines();
                    if self.cursor.is_at_end() {
                        return syntax_error!(self, "reached EOF after '('");
                    }
                    let args = self.parse_call_args()?;
                    self.cursor.skip_newlines();
                    if !self.cursor.eat(&TokenKind::RParen) {
                        return syntax_error!(self, "not found ')'");
                    }
                    ChainOp::Call(args, op_start.merge(self.cursor.previous_span()))
                }
                _ => break,
            };
            span = span.merge(self.cursor.previous_span());
            ops.push(op);
        }

        if ops.is_empty() {
            return Ok(Some(base));
        }
        Ok(Some(Expr::new(
            ExprKind::Chain {
                base: Box::new(base),
                ops,
            },
            span,
        )))
    }

    /// `[test ("," test)*]`, newlines allowed around commas.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        let Some(first) = self.parse_test()? else {
            return Ok(args);
        };
        args.push(first);
        loop {
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                return Ok(args);
            }
            self.cursor.skip_newlines();
            let Some(arg) = self.parse_test()? else {
                return syntax_error!(self, "not found argument after ','");
            };
            args.push(arg);
        }
    }
}
