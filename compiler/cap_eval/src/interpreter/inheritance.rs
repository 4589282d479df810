//! Template inheritance: `extends`, `super`, `block` and `inject`.
//!
//! Every user function call pushes a [`CallFrame`]. `inject name: ... end`
//! records a replacement body in the nearest frame whose function extends
//! another. When that function calls its parent through `super(...)`, the
//! parent's frame inherits the recorded injections, and each
//! `block name: ... end` in the parent runs the injected body instead of
//! its own.
//!
//! Through a longer chain the injections accumulate: a frame inherits its
//! caller's injections overlaid with what the caller itself inherited, so
//! the outermost child wins.

use std::rc::Rc;

use cap_ir::{BlockStmt, Content, InjectStmt};
use rustc_hash::FxHashMap;
use tracing::trace;

use super::Interpreter;
use crate::environment::{LocalScope, Scope};
use crate::errors::{inject_without_extends, EvalResult};
use crate::object::{Function, ObjectRef};

/// A body recorded by `inject`, with the scope it was recorded in.
#[derive(Clone)]
pub(crate) struct Injection {
    body: Rc<[Content]>,
    scope: LocalScope<Scope>,
}

pub(crate) struct CallFrame {
    function: Rc<Function>,
    /// Recorded by `inject` statements in this call.
    injects: FxHashMap<String, Injection>,
    /// Replacements for this call's `block` statements.
    inherited: FxHashMap<String, Injection>,
}

impl Interpreter {
    /// Frame for a call to `callee`. Inherits injections when the caller's
    /// function extends `callee`, i.e. this call is the caller's `super()`.
    pub(crate) fn new_frame(&self, callee: &ObjectRef, function: Rc<Function>) -> CallFrame {
        let inherited = match self.frames.last() {
            Some(caller) if caller.extends(callee) => {
                let mut inherited = caller.injects.clone();
                for (name, injection) in &caller.inherited {
                    inherited.insert(name.clone(), injection.clone());
                }
                inherited
            }
            _ => FxHashMap::default(),
        };
        CallFrame {
            function,
            injects: FxHashMap::default(),
            inherited,
        }
    }

    /// `block name: ... end`
    pub(crate) fn exec_block(&mut self, block: &BlockStmt) -> EvalResult<()> {
        let injection = self
            .frames
            .last()
            .and_then(|frame| frame.inherited.get(&block.name.name))
            .cloned();
        match injection {
            Some(injection) => {
                trace!(block = %block.name.name, "running injected body");
                self.with_scope(&injection.scope, |scoped| scoped.exec_body(&injection.body))
            }
            None => self.exec_body(&block.body),
        }
    }

    /// `inject name: ... end`
    pub(crate) fn register_inject(&mut self, inject: &InjectStmt) -> EvalResult<()> {
        let scope = self.env.current().clone();
        let Some(frame) = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.function.extends.is_some())
        else {
            return Err(inject_without_extends().with_span(inject.name.span).into());
        };
        frame.injects.insert(
            inject.name.name.clone(),
            Injection {
                body: Rc::clone(&inject.body),
                scope,
            },
        );
        Ok(())
    }
}

impl CallFrame {
    fn extends(&self, callee: &ObjectRef) -> bool {
        self.function
            .extends
            .as_ref()
            .is_some_and(|parent| parent.ptr_eq(callee))
    }
}
