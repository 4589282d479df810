//! RAII scope guard for the interpreter's environment.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! so code inside a scope calls interpreter methods as usual. Dropping the
//! guard pops the scope, including when a `?` returns early.
//!
//! ```text
//! {
//!     let mut scoped = interpreter.scoped(&parent);
//!     scoped.env.define(name, value);
//!     scoped.exec_body(body)?;
//! } // scope popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::{LocalScope, Scope};

/// Guard returned by [`Interpreter::scoped`].
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a scope whose parent is `parent` and pop it when the guard
    /// drops.
    pub fn scoped(&mut self, parent: &LocalScope<Scope>) -> ScopedInterpreter<'_> {
        self.env.push_scope(parent);
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a scope whose parent is `parent`.
    pub fn with_scope<T, F>(&mut self, parent: &LocalScope<Scope>, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(parent);
        f(&mut scoped)
    }
}
