//! Builtin functions and modules.
//!
//! Builtins sit below every scope: a name that no scope binds is looked up
//! here, so a program can shadow `puts` or `opts` with its own binding.
//! Each lookup returns a fresh handle.

mod functions;
mod modules;

use crate::errors::{ControlAction, EvalError};
use crate::object::{BuiltinFn, BuiltinFunction, Object, ObjectRef};

const fn builtin(name: &'static str, func: BuiltinFn) -> BuiltinFunction {
    BuiltinFunction { name, func }
}

const FUNCTIONS: &[BuiltinFunction] = &[
    builtin("puts", functions::puts),
    builtin("eputs", functions::eputs),
    builtin("id", functions::id),
    builtin("len", functions::len),
    builtin("copy", functions::copy),
    builtin("deepcopy", functions::deepcopy),
    builtin("assert", functions::assert),
    builtin("extract", functions::extract),
    builtin("setattr", functions::setattr),
    builtin("getattr", functions::getattr),
    builtin("ord", functions::ord),
    builtin("chr", functions::chr),
    builtin("dance", functions::dance),
    builtin("exit", functions::exit),
    builtin("die", functions::die),
];

/// The builtin function or module called `name`.
pub fn lookup(name: &str) -> Option<ObjectRef> {
    if let Some(module) = modules::lookup(name) {
        return Some(module);
    }
    FUNCTIONS
        .iter()
        .find(|builtin| builtin.name == name)
        .map(|builtin| ObjectRef::new(Object::Builtin(*builtin)))
}

/// Names of every builtin, functions first.
pub fn names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS
        .iter()
        .map(|builtin| builtin.name)
        .chain(modules::NAMES.iter().copied())
}

/// A builtin's usage error.
#[cold]
#[track_caller]
fn usage(message: &'static str) -> ControlAction {
    EvalError::new(message).into()
}
