//! Expression nodes.
//!
//! One `ExprKind` variant per expression-level grammar rule, from `or_test`
//! down to `atom`. Levels that merely forward to the next one (a `test` that
//! is just an `or_test`, and so on) are collapsed while parsing.

use std::fmt;

use crate::{Formula, Ident, Span};

/// An expression with its span.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The identifier name if this expression is a bare identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// `a or b` (yields the deciding operand).
    Or(Box<Expr>, Box<Expr>),
    /// `a and b` (yields the deciding operand).
    And(Box<Expr>, Box<Expr>),
    /// `not a` (always a bool).
    Not(Box<Expr>),
    /// `a == b`, `a < b`, ...
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `target += value`, ... Right-associative.
    AugAssign {
        op: AugOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `+ - * / %`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary minus.
    Neg(Box<Expr>),
    /// Postfix chain applied left to right to `base`.
    Chain { base: Box<Expr>, ops: Vec<ChainOp> },
    /// `( formula )`
    Group(Box<Formula>),

    // Atoms
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    Ident(String),
    /// `[a, b = 1, ...]`
    Array(Vec<Assign>),
    /// `{"k": v, ...}`
    Dict(Vec<DictElem>),
}

/// One postfix operation of a chain.
#[derive(Clone, Debug, PartialEq)]
pub enum ChainOp {
    /// `.name`
    Dot(Ident),
    /// `[index]`
    Index(Box<Assign>, Span),
    /// `(args)`
    Call(Vec<Expr>, Span),
}

/// `test (= test)*` where every test but the last is a target.
///
/// With no targets this is a plain expression. Used for array elements,
/// dict keys and values, index expressions, and the elements of an assign
/// list.
#[derive(Clone, Debug, PartialEq)]
pub struct Assign {
    pub targets: Vec<Expr>,
    pub value: Expr,
    pub span: Span,
}

impl Assign {
    /// Wrap a single expression with no assignment targets.
    pub fn plain(value: Expr) -> Self {
        let span = value.span;
        Assign {
            targets: Vec::new(),
            value,
            span,
        }
    }
}

/// `key : value` inside a dict literal.
#[derive(Clone, Debug, PartialEq)]
pub struct DictElem {
    pub key: Assign,
    pub value: Assign,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// Compound assignment operators. Each applies the matching [`BinaryOp`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AugOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl AugOp {
    pub fn binary_op(self) -> BinaryOp {
        match self {
            AugOp::Add => BinaryOp::Add,
            AugOp::Sub => BinaryOp::Sub,
            AugOp::Mul => BinaryOp::Mul,
            AugOp::Div => BinaryOp::Div,
            AugOp::Mod => BinaryOp::Mod,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

impl fmt::Display for AugOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.binary_op())
    }
}
