//! Scope chain for the evaluator.
//!
//! A [`Scope`] maps names to object handles and links to its parent.
//! Scopes are shared ([`LocalScope`]) because a function keeps the scope it
//! was defined in alive after that scope is popped.
//!
//! The [`Environment`] tracks the global scope and a stack of active
//! scopes. A call pushes a scope whose parent is the callee's captured
//! scope, not the caller's, so free names resolve lexically.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::object::{ObjectDict, ObjectRef};

/// Declaration made by `global` or `nonlocal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Declared {
    /// Assignments go to the global scope.
    Global,
    /// Assignments go to the nearest enclosing scope binding the name.
    Nonlocal,
}

/// Error returned by `assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable not found in any scope.
    Undefined,
}

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// This type wraps `Rc<RefCell<T>>` and enforces that all scope allocations
/// go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &LocalScope<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: ObjectDict,
    declared: FxHashMap<String, Declared>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Bindings made directly in this scope, in definition order.
    pub fn bindings(&self) -> &ObjectDict {
        &self.bindings
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: ObjectRef) {
        self.bindings.insert(name, value);
    }

    pub fn get_local(&self, name: &str) -> Option<ObjectRef> {
        self.bindings.get(name).cloned()
    }

    /// Look up a name here, then in each parent.
    pub fn lookup(&self, name: &str) -> Option<ObjectRef> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Replace an existing binding here or in the nearest parent holding it.
    pub fn assign(&mut self, name: &str, value: ObjectRef) -> Result<(), AssignError> {
        if self.bindings.contains_key(name) {
            self.bindings.insert(name, value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>, declared: Declared) {
        self.declared.insert(name.into(), declared);
    }

    pub fn declared(&self, name: &str) -> Option<Declared> {
        self.declared.get(name).copied()
    }
}

/// Environment for the interpreter using a scope stack.
pub struct Environment {
    global: LocalScope<Scope>,
    /// Scopes pushed above the global one, innermost last.
    scopes: Vec<LocalScope<Scope>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            global: LocalScope::new(Scope::new()),
            scopes: Vec::new(),
        }
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// The innermost active scope.
    pub fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Number of scopes pushed above the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a new scope whose parent is `parent`.
    pub fn push_scope(&mut self, parent: &LocalScope<Scope>) {
        self.scopes
            .push(LocalScope::new(Scope::with_parent(parent.clone())));
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Define directly in the current scope, ignoring declarations.
    pub fn define(&mut self, name: impl Into<String>, value: ObjectRef) {
        self.current().borrow_mut().define(name, value);
    }

    pub fn lookup(&self, name: &str) -> Option<ObjectRef> {
        self.current().borrow().lookup(name)
    }

    /// Plain assignment: define in the current scope unless the name was
    /// declared `global` or `nonlocal` there.
    pub fn bind(&mut self, name: &str, value: ObjectRef) -> Result<(), AssignError> {
        let current = self.current().clone();
        let declared = current.borrow().declared(name);
        match declared {
            None => {
                current.borrow_mut().define(name, value);
                Ok(())
            }
            Some(Declared::Global) => {
                self.global.borrow_mut().define(name, value);
                Ok(())
            }
            Some(Declared::Nonlocal) => {
                let parent = current.borrow().parent().cloned();
                match parent {
                    Some(parent) => parent.borrow_mut().assign(name, value),
                    None => Err(AssignError::Undefined),
                }
            }
        }
    }

    /// Update an existing binding wherever it is found.
    pub fn assign(&mut self, name: &str, value: ObjectRef) -> Result<(), AssignError> {
        self.current().borrow_mut().assign(name, value)
    }

    pub fn declare(&mut self, name: &str, declared: Declared) {
        self.current().borrow_mut().declare(name, declared);
    }

    /// Drop every scope and start over with an empty global scope.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.global = LocalScope::new(Scope::new());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
