//! Builtin modules: `opts` and `alias`.
//!
//! `opts` reads the options the host passed in (for the CLI, everything
//! after the program file). `alias` records shell aliases into the
//! context's alias table for the host to act on.

use super::{builtin, usage};
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::object::{BuiltinFunction, Module, Object, ObjectDict, ObjectRef};

pub(super) const NAMES: &[&str] = &["opts", "alias"];

const OPTS: &[BuiltinFunction] = &[
    builtin("get", opts_get),
    builtin("has", opts_has),
    builtin("args", opts_args),
];

const ALIAS: &[BuiltinFunction] = &[builtin("set", alias_set)];

pub(super) fn lookup(name: &str) -> Option<ObjectRef> {
    let members = match name {
        "opts" => OPTS,
        "alias" => ALIAS,
        _ => return None,
    };
    let bindings: ObjectDict = members
        .iter()
        .map(|member| (member.name, ObjectRef::new(Object::Builtin(*member))))
        .collect();
    Some(ObjectRef::new(Object::Module(Module {
        name: name.to_string(),
        bindings,
    })))
}

fn opts_get(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [name] = args else {
        return Err(usage("can't invoke opts.get. need one argument"));
    };
    let name = name
        .string_value()
        .ok_or_else(|| usage("can't invoke opts.get. argument is not string"))?;
    Ok(interp
        .context()
        .opts()
        .get(&name)
        .map_or_else(ObjectRef::nil, ObjectRef::string))
}

fn opts_has(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [name] = args else {
        return Err(usage("can't invoke opts.has. need one argument"));
    };
    let name = name
        .string_value()
        .ok_or_else(|| usage("can't invoke opts.has. argument is not string"))?;
    Ok(ObjectRef::bool(interp.context().opts().has(&name)))
}

/// `opts.args(i)`: the i-th positional argument, or `nil`.
fn opts_args(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [index] = args else {
        return Err(usage("can't invoke opts.args. need one argument"));
    };
    let index = match &*index.borrow() {
        Object::Int(n) => *n,
        _ => return Err(usage("invalid argument type. argument is not int")),
    };
    Ok(interp
        .context()
        .opts()
        .arg(index)
        .map_or_else(ObjectRef::nil, ObjectRef::string))
}

/// `alias.set(name, command[, description])`
fn alias_set(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let (name, command, description) = match args {
        [] | [_] => return Err(usage("can't invoke alias.set. too few arguments")),
        [name, command] => (name, command, None),
        [name, command, description] => (name, command, Some(description)),
        _ => return Err(usage("can't invoke alias.set. too many arguments")),
    };
    let name = name
        .string_value()
        .ok_or_else(|| usage("can't invoke alias.set. key is not string"))?;
    let command = command
        .string_value()
        .ok_or_else(|| usage("can't invoke alias.set. value is not string"))?;
    let description = match description {
        Some(value) => Some(
            value
                .string_value()
                .ok_or_else(|| usage("can't invoke alias.set. description is not unicode"))?,
        ),
        None => None,
    };
    interp
        .context()
        .set_alias(&name, &command, description.as_deref());
    Ok(ObjectRef::nil())
}
