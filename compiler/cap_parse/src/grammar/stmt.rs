//! Statement parsing: control flow, template slots and scope declarations.

use cap_ir::{
    BlockStmt, Body, ElseBranch, ForStmt, Formula, Ident, IfStmt, InjectStmt, Stmt, StmtKind,
    TokenKind,
};

use super::BodyKind;
use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            Some(TokenKind::Import) => self.parse_import_as()?,
            Some(TokenKind::From) => self.parse_from_import()?,
            Some(TokenKind::If) => self.parse_if()?,
            Some(TokenKind::For) => self.parse_for()?,
            Some(TokenKind::Break) => {
                self.cursor.advance();
                StmtKind::Break
            }
            Some(TokenKind::Continue) => {
                self.cursor.advance();
                StmtKind::Continue
            }
            Some(TokenKind::Return) => {
                self.cursor.advance();
                StmtKind::Return(self.parse_formula()?)
            }
            Some(TokenKind::Block) => self.parse_block()?,
            Some(TokenKind::Inject) => self.parse_inject()?,
            Some(TokenKind::Global) => StmtKind::Global(self.parse_scope_names()?),
            Some(TokenKind::Nonlocal) => StmtKind::Nonlocal(self.parse_scope_names()?),
            _ => return Ok(None),
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(Some(Stmt { kind, span }))
    }

    /// `if test: body (elif ... | else: body)? end`
    ///
    /// Each `elif` nests another [`IfStmt`]; the single `end` closes the
    /// whole chain.
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();
        let stmt = self.parse_if_tail()?;
        // The body only stops at a terminator, and the tail consumed any
        // `elif`/`else`, so this is the `end`.
        self.cursor.advance();
        Ok(StmtKind::If(stmt))
    }

    /// Everything after `if` or `elif` up to, not including, the `end`.
    fn parse_if_tail(&mut self) -> Result<IfStmt, ParseError> {
        self.cursor.skip_newlines();
        let Some(cond) = self.parse_test()? else {
            return syntax_error!(self, "syntax error. not found test in if statement");
        };
        self.cursor.skip_newlines();
        if self.cursor.is_at_end() {
            return syntax_error!(self, BodyKind::If.eof_message());
        }
        if !self.cursor.eat(&TokenKind::Colon) {
            return syntax_error!(self, "syntax error. not found colon in if statement");
        }
        let body = self.parse_body(BodyKind::If)?;

        let else_branch = match self.cursor.current_kind() {
            Some(TokenKind::Elif) => {
                self.cursor.advance();
                Some(ElseBranch::Elif(Box::new(self.parse_if_tail()?)))
            }
            Some(TokenKind::Else) => {
                self.cursor.advance();
                self.cursor.skip_newlines();
                if !self.cursor.eat(&TokenKind::Colon) {
                    return syntax_error!(self, "syntax error. not found colon in else statement");
                }
                Some(ElseBranch::Else(self.parse_body(BodyKind::Else)?))
            }
            _ => None,
        };
        Ok(IfStmt {
            cond,
            body,
            else_branch,
        })
    }

    /// `for: ... end`, `for cond: ... end` or `for [init]; [cond]; [update]: ... end`
    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();
        self.cursor.skip_newlines();

        let (init, cond, update) = if self.cursor.eat(&TokenKind::Colon) {
            (None, None, None)
        } else {
            let first = self.parse_formula()?;
            self.cursor.skip_newlines();
            match self.cursor.current_kind() {
                None => return syntax_error!(self, BodyKind::For.eof_message()),
                Some(TokenKind::Colon) if first.is_some() => {
                    self.cursor.advance();
                    (None, first, None)
                }
                Some(TokenKind::Semicolon) => {
                    self.cursor.advance();
                    let (cond, update) = self.parse_for_clauses()?;
                    (first, cond, update)
                }
                Some(_) if first.is_none() => {
                    return syntax_error!(
                        self,
                        "syntax error. not found initialize assign list in for statement"
                    );
                }
                Some(other) => {
                    return syntax_error!(
                        self,
                        format!(
                            "syntax error. unsupported token type ({}) in for statement",
                            other.display_name()
                        )
                    );
                }
            }
        };

        let body = self.parse_body(BodyKind::For)?;
        self.cursor.advance();
        Ok(StmtKind::For(ForStmt {
            init,
            cond,
            update,
            body,
        }))
    }

    /// `[cond]; [update]:` after the first semicolon of a `for`.
    fn parse_for_clauses(&mut self) -> Result<(Option<Formula>, Option<Formula>), ParseError> {
        self.cursor.skip_newlines();
        let cond = self.parse_formula()?;
        self.cursor.skip_newlines();
        if self.cursor.is_at_end() {
            return syntax_error!(self, BodyKind::For.eof_message());
        }
        if !self.cursor.eat(&TokenKind::Semicolon) {
            return syntax_error!(self, "syntax error. not found semicolon (2)");
        }

        self.cursor.skip_newlines();
        let update = self.parse_formula()?;
        self.cursor.skip_newlines();
        if self.cursor.is_at_end() {
            return syntax_error!(self, BodyKind::For.eof_message());
        }
        if !self.cursor.eat(&TokenKind::Colon) {
            return syntax_error!(self, "syntax error. not found colon in for statement");
        }
        Ok((cond, update))
    }

    /// `block name: body end`
    fn parse_block(&mut self) -> Result<StmtKind, ParseError> {
        if !self.in_def {
            return syntax_error!(self, "block statement needs function");
        }
        self.cursor.advance();
        let (name, body) = self.parse_slot(BodyKind::Block)?;
        Ok(StmtKind::Block(BlockStmt { name, body }))
    }

    /// `inject name: body end`
    fn parse_inject(&mut self) -> Result<StmtKind, ParseError> {
        if !self.in_def {
            return syntax_error!(self, "inject statement needs function");
        }
        self.cursor.advance();
        let (name, body) = self.parse_slot(BodyKind::Inject)?;
        Ok(StmtKind::Inject(InjectStmt {
            name,
            body: body.into(),
        }))
    }

    /// Shared tail of `block` and `inject`: `name: body end`.
    fn parse_slot(&mut self, kind: BodyKind) -> Result<(Ident, Body), ParseError> {
        let what = if kind == BodyKind::Block {
            "block"
        } else {
            "inject"
        };
        let Some(name) = self.cursor.eat_ident() else {
            return syntax_error!(self, format!("not found identifier in {what} statement"));
        };
        if !self.cursor.eat(&TokenKind::Colon) {
            return syntax_error!(self, format!("not found colon in {what} statement"));
        }
        let body = self.parse_body(kind)?;
        self.cursor.advance();
        Ok((name, body))
    }

    /// `global a, b` / `nonlocal a, b`
    fn parse_scope_names(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.cursor.advance();
        let mut names = Vec::new();
        loop {
            let Some(name) = self.cursor.eat_ident() else {
                return syntax_error!(self, "not found identifier");
            };
            names.push(name);
            if !self.cursor.eat(&TokenKind::Comma) {
                return Ok(names);
            }
        }
    }
}
