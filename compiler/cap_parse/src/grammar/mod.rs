//! Grammar rules.
//!
//! - `mod.rs`: program, segments, construct bodies, elems
//! - `stmt.rs`: control flow, `block`/`inject`, `global`/`nonlocal`
//! - `item.rs`: `def`, `struct`, imports
//! - `expr/`: formulas and the expression precedence chain

mod expr;
mod item;
mod stmt;

use cap_ir::{Blocks, Body, Content, Elem, Segment, TokenKind};
use cap_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseResult, Parser};

/// The construct a body belongs to. Decides where the body stops and
/// which messages a malformed body reports.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum BodyKind {
    If,
    Else,
    For,
    Def,
    Block,
    Inject,
}

impl BodyKind {
    fn is_terminator(self, kind: &TokenKind) -> bool {
        match self {
            BodyKind::If => matches!(kind, TokenKind::End | TokenKind::Elif | TokenKind::Else),
            _ => matches!(kind, TokenKind::End),
        }
    }

    fn eof_message(self) -> &'static str {
        match self {
            BodyKind::If => "reached EOF in if statement",
            BodyKind::Else => "reached EOF in else statement",
            BodyKind::For => "reached EOF in for statement",
            BodyKind::Def => "syntax error. reached EOF in parse func def",
            BodyKind::Block => "not found 'end' in block statement",
            BodyKind::Inject => "not found 'end' in inject statement",
        }
    }

    fn missing_end_message(self) -> &'static str {
        match self {
            BodyKind::If => "syntax error. not found 'end' in if statement",
            BodyKind::Else => "syntax error. not found 'end' in else statement",
            BodyKind::For => "syntax error. not found 'end' in for statement",
            BodyKind::Def => "not found 'end' in parse func def",
            BodyKind::Block => "not found 'end' in block statement",
            BodyKind::Inject => "not found 'end' in inject statement",
        }
    }

    fn missing_reopen_message(self) -> &'static str {
        match self {
            BodyKind::If => "not found '{@' in if statement",
            BodyKind::Else => "not found '{@'",
            BodyKind::For => "not found '{@' in for statement",
            BodyKind::Def | BodyKind::Block | BodyKind::Inject => "not found '{@' in content",
        }
    }
}

impl Parser<'_> {
    /// `program = blocks`, with nothing left over.
    pub(crate) fn parse_program(&mut self, segments: &mut Vec<Segment>) -> Result<(), ParseError> {
        self.parse_segments(segments)?;
        match self.cursor.current_kind() {
            None => Ok(()),
            Some(kind) => syntax_error!(
                self,
                format!("syntax error. unsupported token \"{}\"", kind.display_name())
            ),
        }
    }

    /// `blocks = (code_block | ref_block | text_block)*`
    fn parse_segments(&mut self, segments: &mut Vec<Segment>) -> Result<(), ParseError> {
        loop {
            let segment = if let Some(segment) = self.parse_code_block()? {
                segment
            } else if let Some(segment) = self.parse_ref_block()? {
                segment
            } else if let Some(segment) = self.parse_text_block() {
                segment
            } else {
                return Ok(());
            };
            segments.push(segment);
        }
    }

    fn parse_text_block(&mut self) -> Option<Segment> {
        let token = self.cursor.current()?;
        let TokenKind::Text(text) = &token.kind else {
            return None;
        };
        self.cursor.advance();
        Some(Segment::Text(text.clone(), token.span))
    }

    /// `{@ elems @}`
    ///
    /// When the region is not closed right after its elems the whole rule
    /// backs out without an error. That is what lets a body written as
    /// `@} text {@ end` stop at the `{@` that reopens it.
    fn parse_code_block(&mut self) -> ParseResult<Segment> {
        let start = self.cursor.position();
        let open_span = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::StmtOpen) {
            return Ok(None);
        }
        self.cursor.skip_newlines();
        let elems = self.parse_elems()?;
        self.cursor.skip_newlines();

        if self.cursor.is_at_end() {
            return syntax_error!(self, "syntax error. reached EOF in code block");
        }
        if !self.cursor.eat(&TokenKind::StmtClose) {
            self.cursor.set_position(start);
            return Ok(None);
        }
        let span = open_span.merge(self.cursor.previous_span());
        self.cursor.skip_newlines();
        Ok(Some(Segment::Code(elems, span)))
    }

    /// `{: formula :}`
    fn parse_ref_block(&mut self) -> ParseResult<Segment> {
        let open_span = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::ExprOpen) {
            return Ok(None);
        }
        self.cursor.skip_newlines();
        let Some(formula) = self.parse_formula()? else {
            return syntax_error!(self, "syntax error. not found formula in reference block");
        };
        self.cursor.skip_newlines();

        if self.cursor.is_at_end() {
            return syntax_error!(self, "syntax error. reached EOF in reference block");
        }
        if !self.cursor.eat(&TokenKind::ExprClose) {
            return syntax_error!(self, "syntax error. not found \":}\"");
        }
        let span = open_span.merge(self.cursor.previous_span());
        Ok(Some(Segment::Ref(formula, span)))
    }

    /// Body of a block-introducing construct, up to (not including) its
    /// terminator. The body may close the code region and reopen it later:
    /// `if x: @}text{: y :}{@ end`.
    pub(crate) fn parse_body(&mut self, kind: BodyKind) -> Result<Body, ParseError> {
        ensure_sufficient_stack(|| {
            let mut body = Vec::new();
            loop {
                self.cursor.skip_newlines();
                let Some(current) = self.cursor.current_kind() else {
                    return syntax_error!(self, kind.eof_message());
                };
                if kind.is_terminator(current) {
                    return Ok(body);
                }

                if self.cursor.eat(&TokenKind::StmtClose) {
                    self.cursor.skip_newlines();
                    let mut segments = Vec::new();
                    self.parse_segments(&mut segments)?;
                    self.cursor.skip_newlines();
                    if self.cursor.is_at_end() {
                        return syntax_error!(self, kind.eof_message());
                    }
                    if !self.cursor.eat(&TokenKind::StmtOpen) {
                        return syntax_error!(self, kind.missing_reopen_message());
                    }
                    body.push(Content::Blocks(Blocks { segments }));
                    continue;
                }

                let elems = self.parse_elems()?;
                if elems.is_empty() {
                    return syntax_error!(self, kind.missing_end_message());
                }
                body.push(Content::Elems(elems));
            }
        })
    }

    /// `elems = (def | stmt | struct | formula)*`, newlines skipped after
    /// each. No separator is required between two elems.
    pub(crate) fn parse_elems(&mut self) -> Result<Vec<Elem>, ParseError> {
        let mut elems = Vec::new();
        while let Some(elem) = self.parse_elem()? {
            elems.push(elem);
            self.cursor.skip_newlines();
        }
        Ok(elems)
    }

    fn parse_elem(&mut self) -> ParseResult<Elem> {
        if let Some(def) = self.parse_func_def()? {
            return Ok(Some(Elem::Def(def.into())));
        }
        if let Some(stmt) = self.parse_stmt()? {
            return Ok(Some(Elem::Stmt(stmt)));
        }
        if let Some(def) = self.parse_struct()? {
            return Ok(Some(Elem::Struct(def.into())));
        }
        Ok(self.parse_formula()?.map(Elem::Formula))
    }
}
