//! `InterpreterBuilder` for creating interpreters over a shared context.

use std::rc::Rc;

use cap_diagnostic::ErrorStack;

use super::Interpreter;
use crate::binding::BindingKind;
use crate::context::Context;
use crate::environment::Environment;
use crate::object::ObjectRef;

/// Builder for [`Interpreter`].
///
/// Every interpreter needs a [`Context`]. Imports build child interpreters
/// over the parent's context so output, opts and aliases are shared.
pub struct InterpreterBuilder {
    context: Rc<Context>,
    bindings: Vec<(String, ObjectRef)>,
}

impl InterpreterBuilder {
    pub fn new(context: Rc<Context>) -> Self {
        InterpreterBuilder {
            context,
            bindings: Vec::new(),
        }
    }

    /// Predefine a global before the program runs.
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, value: ObjectRef) -> Self {
        self.bindings.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, ObjectRef)>,
        S: Into<String>,
    {
        self.bindings
            .extend(bindings.into_iter().map(|(name, value)| (name.into(), value)));
        self
    }

    pub fn build(self) -> Interpreter {
        let mut env = Environment::new();
        for (name, value) in &self.bindings {
            env.define(name.as_str(), BindingKind::bind(value));
        }
        Interpreter {
            env,
            context: self.context,
            source: None,
            errors: ErrorStack::new(),
            loop_depth: 0,
            function_depth: 0,
            frames: Vec::new(),
        }
    }
}
