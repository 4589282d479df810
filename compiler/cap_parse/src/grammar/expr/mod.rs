//! Formula and expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: formulas (assign lists, multi assigns, test lists) and the
//!   binary precedence chain from `or` down to unary minus
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: parenthesized formulas, literals, arrays, dicts
//! - `postfix.rs`: `.name`, `[index]` and `(args)` chains
//!
//! Newlines are skipped after every operator, so an expression may wrap
//! after a binary operator but not before one.

mod operators;
mod postfix;
mod primary;

use cap_ir::{Assign, BinaryOp, Expr, ExprKind, Formula, TestList, TokenKind};
use cap_stack::ensure_sufficient_stack;

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// `formula = assign_list | multi_assign`
    pub(crate) fn parse_formula(&mut self) -> ParseResult<Formula> {
        if let Some(list) = self.parse_assign_list()? {
            return Ok(Some(Formula::AssignList(list)));
        }
        Ok(self.parse_multi_assign()?.map(Formula::MultiAssign))
    }

    /// `assign ("," assign)*`
    ///
    /// Backs out entirely if any element is not an assignment, so
    /// `a = 1, 2` falls through to a multi assign of `[1, 2]`.
    fn parse_assign_list(&mut self) -> ParseResult<Vec<Assign>> {
        let start = self.cursor.position();
        let mut list = Vec::new();
        loop {
            let Some(assign) = self.parse_assign()? else {
                self.cursor.set_position(start);
                return Ok(None);
            };
            list.push(assign);
            if !self.cursor.eat(&TokenKind::Comma) {
                return Ok(Some(list));
            }
            self.cursor.skip_newlines();
        }
    }

    /// `test "=" test ("=" test)*`
    fn parse_assign(&mut self) -> ParseResult<Assign> {
        let start = self.cursor.position();
        let Some(first) = self.parse_test()? else {
            return Ok(None);
        };
        if !self.cursor.check(&TokenKind::Assign) {
            self.cursor.set_position(start);
            return Ok(None);
        }

        let mut rest = Vec::new();
        while self.cursor.eat(&TokenKind::Assign) {
            self.cursor.skip_newlines();
            let Some(rhs) = self.parse_test()? else {
                return syntax_error!(self, "syntax error. not found rhs test in assign list");
            };
            rest.push(rhs);
        }
        Ok(Some(make_assign(first, rest)))
    }

    /// `test_list ("=" test_list)*`
    fn parse_multi_assign(&mut self) -> ParseResult<Vec<TestList>> {
        let Some(first) = self.parse_test_list()? else {
            return Ok(None);
        };
        let mut lists = vec![first];
        while self.cursor.eat(&TokenKind::Assign) {
            self.cursor.skip_newlines();
            let Some(rhs) = self.parse_test_list()? else {
                return syntax_error!(self, "syntax error. not found rhs in multi assign");
            };
            lists.push(rhs);
        }
        Ok(Some(lists))
    }

    /// `test ("," test)*`
    fn parse_test_list(&mut self) -> ParseResult<TestList> {
        let Some(first) = self.parse_test()? else {
            return Ok(None);
        };
        let mut span = first.span;
        let mut tests = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            self.cursor.skip_newlines();
            let Some(test) = self.parse_test()? else {
                return syntax_error!(self, "syntax error. not found test in test list");
            };
            span = span.merge(test.span);
            tests.push(test);
        }
        Ok(Some(TestList { tests, span }))
    }

    /// `test ("=" test)*` inside brackets: array elements, dict keys and
    /// values, and indexes.
    pub(crate) fn parse_simple_assign(&mut self) -> ParseResult<Assign> {
        let Some(first) = self.parse_test()? else {
            return Ok(None);
        };
        let mut rest = Vec::new();
        while self.cursor.eat(&TokenKind::Assign) {
            self.cursor.skip_newlines();
            let Some(rhs) = self.parse_test()? else {
                return syntax_error!(self, "not found rhs operand in simple assign");
            };
            rest.push(rhs);
        }
        Ok(Some(make_assign(first, rest)))
    }

    /// Parse a `test` (an `or_test`).
    ///
    /// Uses `ensure_sufficient_stack` since every parenthesized formula
    /// and bracket comes back through here.
    pub(crate) fn parse_test(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.parse_or())
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let Some(mut left) = self.parse_and()? else {
            return Ok(None);
        };
        while self.cursor.eat(&TokenKind::Or) {
            self.cursor.skip_newlines();
            let Some(right) = self.parse_and()? else {
                return syntax_error!(self, "syntax error. not found rhs operand in 'or' operator");
            };
            let span = left.span.merge(right.span);
            left = Expr::new(ExprKind::Or(Box::new(left), Box::new(right)), span);
        }
        Ok(Some(left))
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let Some(mut left) = self.parse_not()? else {
            return Ok(None);
        };
        while self.cursor.eat(&TokenKind::And) {
            self.cursor.skip_newlines();
            let Some(right) = self.parse_not()? else {
                return syntax_error!(self, "syntax error. not found rhs operand in 'and' operator");
            };
            let span = left.span.merge(right.span);
            left = Expr::new(ExprKind::And(Box::new(left), Box::new(right)), span);
        }
        Ok(Some(left))
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::Not) {
            return self.parse_comparison();
        }
        self.cursor.skip_newlines();
        let Some(operand) = ensure_sufficient_stack(|| self.parse_not())? else {
            return syntax_error!(self, "syntax error. not found operand in not operator");
        };
        let span = start.merge(operand.span);
        Ok(Some(Expr::new(ExprKind::Not(Box::new(operand)), span)))
    }

    /// Left-associative, so `a < b < c` is `(a < b) < c`.
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let Some(mut left) = self.parse_asscalc()? else {
            return Ok(None);
        };
        while let Some(op) = self.match_compare_op() {
            self.cursor.advance();
            self.cursor.skip_newlines();
            let Some(right) = self.parse_asscalc()? else {
                return syntax_error!(self, "syntax error. not found rhs operand in comparison");
            };
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Compare {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(Some(left))
    }

    /// Compound assignment, right-associative: `a += b -= 1`.
    fn parse_asscalc(&mut self) -> ParseResult<Expr> {
        let Some(target) = self.parse_expr()? else {
            return Ok(None);
        };
        let Some(op) = self.match_aug_op() else {
            return Ok(Some(target));
        };
        self.cursor.advance();
        self.cursor.skip_newlines();
        let Some(value) = ensure_sufficient_stack(|| self.parse_asscalc())? else {
            return syntax_error!(self, "syntax error. not found rhs operand in asscalc");
        };
        let span = target.span.merge(value.span);
        Ok(Some(Expr::new(
            ExprKind::AugAssign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        )))
    }

    /// `+` and `-`.
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let Some(mut left) = self.parse_term()? else {
            return Ok(None);
        };
        while let Some(op) = self.match_additive_op() {
            self.cursor.advance();
            self.cursor.skip_newlines();
            let Some(right) = self.parse_term()? else {
                return syntax_error!(self, "syntax error. not found rhs operand in expr");
            };
            left = binary(op, left, right);
        }
        Ok(Some(left))
    }

    /// `*`, `/` and `%`.
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let Some(mut left) = self.parse_negative()? else {
            return Ok(None);
        };
        while let Some(op) = self.match_multiplicative_op() {
            self.cursor.advance();
            self.cursor.skip_newlines();
            let Some(right) = self.parse_negative()? else {
                return syntax_error!(self, "syntax error. not found rhs operand in term");
            };
            left = binary(op, left, right);
        }
        Ok(Some(left))
    }

    /// `"-"? chain`
    fn parse_negative(&mut self) -> ParseResult<Expr> {
        let start = self.cursor.current_span();
        if !self.cursor.eat(&TokenKind::Minus) {
            return self.parse_chain();
        }
        self.cursor.skip_newlines();
        let Some(operand) = self.parse_chain()? else {
            return syntax_error!(self, "syntax error. not found operand in negative");
        };
        let span = start.merge(operand.span);
        Ok(Some(Expr::new(ExprKind::Neg(Box::new(operand)), span)))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

/// Split `first = r0 = ... = rn` into targets `first, r0..rn-1` and value `rn`.
fn make_assign(first: Expr, mut rest: Vec<Expr>) -> Assign {
    let Some(value) = rest.pop() else {
        return Assign::plain(first);
    };
    let span = first.span.merge(value.span);
    let mut targets = Vec::with_capacity(rest.len() + 1);
    targets.push(first);
    targets.extend(rest);
    Assign {
        targets,
        value,
        span,
    }
}
