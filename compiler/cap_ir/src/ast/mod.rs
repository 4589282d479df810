//! AST node model.
//!
//! The tree mirrors the grammar: a [`Program`] is a run of [`Blocks`]
//! segments (literal text, `{@ ... @}` code, `{: ... :}` references). Code
//! is a list of [`Elem`]s, each a definition, a statement, or a formula.
//!
//! Nodes are immutable once parsing succeeds. Function and struct
//! definitions are reference counted so that runtime function objects can
//! keep their bodies alive after the tree that produced them is gone; no
//! node is ever reachable from two parents.

mod expr;
mod stmt;

use std::rc::Rc;

use crate::Span;

pub use expr::{Assign, AugOp, BinaryOp, ChainOp, CompareOp, DictElem, Expr, ExprKind};
pub use stmt::{
    BlockStmt, ElseBranch, ForStmt, FuncDef, IfStmt, ImportName, InjectStmt, Stmt, StmtKind,
    StructDef,
};

/// Root of one compiled source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub blocks: Blocks,
}

/// Sequential output segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blocks {
    pub segments: Vec<Segment>,
}

impl Blocks {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Literal text, emitted verbatim.
    Text(String, Span),
    /// `{@ elems @}`
    Code(Vec<Elem>, Span),
    /// `{: formula :}`, emits the stringified first value.
    Ref(Formula, Span),
}

/// One item of a construct body: either code, or a run of segments that
/// appears between `@}` and the next `{@` inside the body.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Elems(Vec<Elem>),
    Blocks(Blocks),
}

/// Body of `if`, `for`, `def`, `block` and `inject`.
pub type Body = Vec<Content>;

#[derive(Clone, Debug, PartialEq)]
pub enum Elem {
    Def(Rc<FuncDef>),
    Struct(Rc<StructDef>),
    Stmt(Stmt),
    Formula(Formula),
}

/// Top-level expression statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Formula {
    /// `a = 1, b = c = 2`: one or more independent assignments.
    AssignList(Vec<Assign>),
    /// `a, b = 1, 2` or a bare test list. The last list is the value.
    MultiAssign(Vec<TestList>),
}

impl Formula {
    pub fn span(&self) -> Span {
        match self {
            Formula::AssignList(list) => list
                .iter()
                .map(|a| a.span)
                .reduce(Span::merge)
                .unwrap_or(Span::DUMMY),
            Formula::MultiAssign(lists) => lists
                .iter()
                .map(|l| l.span)
                .reduce(Span::merge)
                .unwrap_or(Span::DUMMY),
        }
    }
}

/// `test ("," test)*`
#[derive(Clone, Debug, PartialEq)]
pub struct TestList {
    pub tests: Vec<Expr>,
    pub span: Span,
}

/// Identifier occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}
