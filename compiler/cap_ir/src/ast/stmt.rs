//! Statement and definition nodes.

use std::rc::Rc;

use crate::{Body, Content, Elem, Expr, Formula, Ident, Span};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `import "path" as alias`
    Import { path: String, alias: Ident },
    /// `from "path" import name [as alias], ...`
    FromImport {
        path: String,
        names: Vec<ImportName>,
    },
    If(IfStmt),
    For(ForStmt),
    Break,
    Continue,
    /// `return [formula]`
    Return(Option<Formula>),
    Block(BlockStmt),
    Inject(InjectStmt),
    /// `global a, b`
    Global(Vec<Ident>),
    /// `nonlocal a, b`
    Nonlocal(Vec<Ident>),
}

/// One name in a `from ... import` list.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportName {
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl ImportName {
    /// The name the binding receives in the importing scope.
    pub fn bound_name(&self) -> &str {
        self.alias.as_ref().unwrap_or(&self.name).name.as_str()
    }
}

/// `if cond: body (elif ... | else: body)? end`
#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub body: Body,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ElseBranch {
    Elif(Box<IfStmt>),
    Else(Body),
}

/// Every clause is optional: `for:`, `for cond:`, `for init; cond; update:`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub init: Option<Formula>,
    pub cond: Option<Formula>,
    pub update: Option<Formula>,
    pub body: Body,
}

/// `block name: body end` - a named, replaceable output slot.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockStmt {
    pub name: Ident,
    pub body: Body,
}

/// `inject name: body end` - replacement content for an ancestor's block.
///
/// The body is reference counted because it outlives the statement while
/// it waits in the pending injection map of a `super()` call.
#[derive(Clone, Debug, PartialEq)]
pub struct InjectStmt {
    pub name: Ident,
    pub body: Rc<[Content]>,
}

/// `def name(params) [extends parent]: body end`, or `met` for methods.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub extends: Option<Ident>,
    /// Defined with `met`: the call owner is passed as the first argument.
    pub is_method: bool,
    pub body: Body,
    pub span: Span,
}

/// `struct Name [extends Parent]: elems end`
#[derive(Clone, Debug, PartialEq)]
pub struct StructDef {
    pub name: Ident,
    pub extends: Option<Ident>,
    pub elems: Vec<Elem>,
    pub span: Span,
}
