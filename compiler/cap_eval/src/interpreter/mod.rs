//! Tree-walking interpreter.
//!
//! The interpreter walks the AST directly. Statements write to the shared
//! [`Context`] output handlers as they run; errors and `break`/`continue`/
//! `return`/`exit` unwind through [`EvalResult`] as a [`ControlAction`].
//!
//! Helper modules split the walk by concern:
//!
//! - `expr` - expressions, chains, indexing and attributes
//! - `assign` - assignment targets, multi-assign, compound assignment
//! - `call` - function, method and struct calls; `def` and `struct`
//! - `inheritance` - `extends`/`super`/`block`/`inject` bookkeeping
//! - `import` - `import` and `from ... import`
//!
//! A call pushes a scope whose parent is the callee's defining scope, so
//! free names resolve where the function was written, not where it runs.

mod assign;
mod builder;
mod call;
mod expr;
mod import;
mod inheritance;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use cap_diagnostic::{push_error, ErrorStack, ProgramLocation, SourceFile};
use cap_ir::{Blocks, Body, Content, ElseBranch, Elem, ForStmt, IfStmt, Program, Segment, Stmt, StmtKind};
use tracing::debug;

use crate::context::Context;
use crate::environment::Declared;
use crate::errors::{invalid_break, invalid_continue, invalid_return, ControlAction, EvalResult};
use crate::object::ObjectRef;

use inheritance::CallFrame;

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The program ran to its end.
    Completed,
    /// `exit(code)` or `die(...)` stopped the program.
    Exited(i32),
    /// Scanning, compiling or evaluating failed; see the error stack.
    Failed,
}

pub struct Interpreter {
    pub(crate) env: crate::environment::Environment,
    context: Rc<Context>,
    /// Program being run, for locating errors.
    source: Option<Rc<SourceFile>>,
    errors: ErrorStack,
    /// Loops entered since the innermost function boundary.
    loop_depth: usize,
    function_depth: usize,
    /// Active user function calls, innermost last.
    frames: Vec<CallFrame>,
}

impl Interpreter {
    pub fn builder(context: Rc<Context>) -> InterpreterBuilder {
        InterpreterBuilder::new(context)
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.context
    }

    pub fn errors(&self) -> &ErrorStack {
        &self.errors
    }

    pub fn take_errors(&mut self) -> ErrorStack {
        std::mem::take(&mut self.errors)
    }

    pub fn global(&self, name: &str) -> Option<ObjectRef> {
        self.env.global().borrow().get_local(name)
    }

    /// Captured stdout so far. Empty when streaming.
    pub fn stdout_text(&self) -> String {
        self.context.stdout().get_output()
    }

    /// Captured stderr so far. Empty when streaming.
    pub fn stderr_text(&self) -> String {
        self.context.stderr().get_output()
    }

    /// Drop every scope, error and captured output, keeping the shared
    /// context so the interpreter can run another program.
    pub fn reset(&mut self) {
        self.env.reset();
        self.errors.clear();
        self.loop_depth = 0;
        self.function_depth = 0;
        self.frames.clear();
        self.source = None;
        self.context.reset();
    }

    /// Scan, compile and run `text`.
    ///
    /// Errors are pushed onto the error stack; nothing runs when scanning
    /// or compiling fails. Output written before an evaluation error stays
    /// in the output handlers.
    pub fn execute(&mut self, name: Option<&str>, text: &str) -> RunStatus {
        let source = Rc::new(SourceFile::new(name.map(str::to_string), text));
        self.source = Some(Rc::clone(&source));

        let tokens = match cap_lexer::scan(text) {
            Ok(tokens) => tokens,
            Err(err) => {
                push_error!(self.errors, err.message(), ProgramLocation::at(&source, err.span));
                return RunStatus::Failed;
            }
        };

        let output = cap_parse::compile(&tokens);
        if output.has_errors() {
            for err in output.errors {
                self.errors.push(err.into_record(Some(&source)));
            }
            return RunStatus::Failed;
        }
        let Some(program) = output.program else {
            return RunStatus::Completed;
        };

        match self.run_program(&program) {
            Ok(()) => RunStatus::Completed,
            Err(ControlAction::Exit(code)) => {
                debug!(code, "program exited");
                RunStatus::Exited(code)
            }
            Err(action) => {
                let err = action.into_eval_error();
                debug!(error = %err, "evaluation failed");
                self.errors.push(err.to_record(Some(&source)));
                RunStatus::Failed
            }
        }
    }

    /// Run a compiled program in the global scope.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_program(&mut self, program: &Program) -> EvalResult<()> {
        self.exec_blocks(&program.blocks)
    }

    fn print(&self, text: &str) {
        self.context.stdout().print(text);
    }

    pub(crate) fn exec_blocks(&mut self, blocks: &Blocks) -> EvalResult<()> {
        for segment in &blocks.segments {
            match segment {
                Segment::Text(text, _) => self.print(text),
                Segment::Code(elems, _) => self.exec_elems(elems)?,
                Segment::Ref(formula, span) => {
                    let values = self
                        .eval_formula(formula)
                        .map_err(|a| a.with_span_if_error(*span))?;
                    if let Some(first) = values.first() {
                        self.print(&first.to_display_string());
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn exec_body(&mut self, body: &[Content]) -> EvalResult<()> {
        for content in body {
            match content {
                Content::Elems(elems) => self.exec_elems(elems)?,
                Content::Blocks(blocks) => self.exec_blocks(blocks)?,
            }
        }
        Ok(())
    }

    pub(crate) fn exec_elems(&mut self, elems: &[Elem]) -> EvalResult<()> {
        for elem in elems {
            match elem {
                Elem::Def(def) => self
                    .define_function(def)
                    .map_err(|a| a.with_span_if_error(def.span))?,
                Elem::Struct(def) => self
                    .define_struct(def)
                    .map_err(|a| a.with_span_if_error(def.span))?,
                Elem::Stmt(stmt) => self
                    .exec_stmt(stmt)
                    .map_err(|a| a.with_span_if_error(stmt.span))?,
                Elem::Formula(formula) => {
                    self.eval_formula(formula)?;
                }
            }
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match &stmt.kind {
            StmtKind::Import { path, alias } => self.exec_import(path, alias),
            StmtKind::FromImport { path, names } => self.exec_from_import(path, names),
            StmtKind::If(if_stmt) => self.exec_if(if_stmt),
            StmtKind::For(for_stmt) => self.exec_for(for_stmt),
            StmtKind::Break => {
                if self.loop_depth == 0 {
                    return Err(invalid_break().into());
                }
                Err(ControlAction::Break)
            }
            StmtKind::Continue => {
                if self.loop_depth == 0 {
                    return Err(invalid_continue().into());
                }
                Err(ControlAction::Continue)
            }
            StmtKind::Return(formula) => {
                if self.function_depth == 0 {
                    return Err(invalid_return().into());
                }
                let value = match formula {
                    Some(formula) => {
                        let values = self.eval_formula(formula)?;
                        collapse_values(values)
                    }
                    None => ObjectRef::nil(),
                };
                Err(ControlAction::Return(value))
            }
            StmtKind::Block(block) => self.exec_block(block),
            StmtKind::Inject(inject) => self.register_inject(inject),
            StmtKind::Global(names) => {
                for name in names {
                    self.env.declare(&name.name, Declared::Global);
                }
                Ok(())
            }
            StmtKind::Nonlocal(names) => {
                for name in names {
                    self.env.declare(&name.name, Declared::Nonlocal);
                }
                Ok(())
            }
        }
    }

    fn exec_if(&mut self, stmt: &IfStmt) -> EvalResult<()> {
        let mut current = stmt;
        loop {
            if self.eval_expr(&current.cond)?.is_truthy() {
                return self.exec_body(&current.body);
            }
            match &current.else_branch {
                Some(ElseBranch::Elif(next)) => current = next,
                Some(ElseBranch::Else(body)) => return self.exec_else(body),
                None => return Ok(()),
            }
        }
    }

    fn exec_else(&mut self, body: &Body) -> EvalResult<()> {
        self.exec_body(body)
    }

    fn exec_for(&mut self, stmt: &ForStmt) -> EvalResult<()> {
        if let Some(init) = &stmt.init {
            self.eval_formula(init)?;
        }
        self.loop_depth += 1;
        let result = self.run_loop(stmt);
        self.loop_depth -= 1;
        result
    }

    fn run_loop(&mut self, stmt: &ForStmt) -> EvalResult<()> {
        loop {
            if let Some(cond) = &stmt.cond {
                let values = self.eval_formula(cond)?;
                if !values.first().is_some_and(ObjectRef::is_truthy) {
                    return Ok(());
                }
            }
            match self.exec_body(&stmt.body) {
                Ok(()) | Err(ControlAction::Continue) => {}
                Err(ControlAction::Break) => return Ok(()),
                Err(other) => return Err(other),
            }
            if let Some(update) = &stmt.update {
                self.eval_formula(update)?;
            }
        }
    }
}

/// Value of a multi-valued result: `nil` for none, the value itself for
/// one, an array for several.
pub(crate) fn collapse_values(mut values: Vec<ObjectRef>) -> ObjectRef {
    match values.len() {
        0 => ObjectRef::nil(),
        1 => values.swap_remove(0),
        _ => ObjectRef::array(values),
    }
}

#[cfg(test)]
mod tests;
