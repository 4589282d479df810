//! Global builtin functions.

use std::rc::Rc;

use super::usage;
use crate::binding::BindingKind;
use crate::errors::{assertion_failed, ControlAction, EvalResult};
use crate::interpreter::{Interpreter, RunStatus};
use crate::object::{Object, ObjectDict, ObjectRef};

fn display_line(args: &[ObjectRef]) -> String {
    let mut line = args
        .iter()
        .map(ObjectRef::to_display_string)
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}

fn count(n: usize) -> ObjectRef {
    ObjectRef::int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// `puts(...)`: write the arguments to stdout. Returns how many there were.
pub(super) fn puts(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    interp.context().stdout().print(&display_line(args));
    Ok(count(args.len()))
}

/// `eputs(...)`: like `puts`, to stderr.
pub(super) fn eputs(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    interp.context().stderr().print(&display_line(args));
    Ok(count(args.len()))
}

pub(super) fn id(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    match args {
        [value] => Ok(ObjectRef::int(value.id())),
        _ => Err(usage("invalid arguments length")),
    }
}

pub(super) fn len(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [value] = args else {
        return Err(usage("len function need one argument"));
    };
    let n = match &*value.borrow() {
        Object::Str(s) => s.chars().count(),
        Object::Array(items) => items.len(),
        Object::Dict(dict) => dict.len(),
        _ => return Err(usage("unsupported object")),
    };
    Ok(count(n))
}

pub(super) fn copy(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    match args {
        [value] => Ok(value.shallow_copy()),
        _ => Err(usage("invalid arguments length for copy")),
    }
}

pub(super) fn deepcopy(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    match args {
        [value] => Ok(value.deep_copy()),
        _ => Err(usage("invalid arguments length for deepcopy")),
    }
}

pub(super) fn assert(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    match args {
        [value] if value.is_truthy() => Ok(ObjectRef::nil()),
        [_] => Err(assertion_failed().into()),
        _ => Err(usage("invalid arguments length for assert")),
    }
}

/// Entries of a dict-like object: dict entries, struct or instance fields,
/// module bindings.
fn entries(value: &ObjectRef) -> Option<ObjectDict> {
    match &*value.borrow() {
        Object::Dict(dict) => Some(dict.clone()),
        Object::Instance(instance) => Some(instance.fields.clone()),
        Object::StructDef(def) => Some(def.fields.clone()),
        Object::Module(module) => Some(module.bindings.clone()),
        _ => None,
    }
}

/// `extract(x, ...)`: define every entry of each argument in the current
/// scope.
pub(super) fn extract(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    if args.is_empty() {
        return Err(usage("invalid arguments length for extract"));
    }
    for arg in args {
        let entries = entries(arg).ok_or_else(|| usage("unsupported object"))?;
        for (name, value) in entries.iter() {
            interp.env.define(name, value.clone());
        }
    }
    Ok(ObjectRef::nil())
}

pub(super) fn setattr(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [owner, name, value] = args else {
        return Err(usage("invalid arguments length for setattr"));
    };
    let name = name.string_value().ok_or_else(|| usage("invalid key"))?;
    let value = BindingKind::bind(value);
    match &mut *owner.borrow_mut() {
        Object::Dict(dict) => dict.insert(name, value),
        Object::Instance(instance) => instance.fields.insert(name, value),
        Object::StructDef(def) => def.fields.insert(name, value),
        Object::Module(module) => module.bindings.insert(name, value),
        _ => return Err(usage("unsupported object type")),
    };
    Ok(ObjectRef::nil())
}

/// `getattr(owner, name)`. A missing name gives `nil`.
pub(super) fn getattr(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [owner, name] = args else {
        return Err(usage("invalid arguments length for getattr"));
    };
    let name = name.string_value().ok_or_else(|| usage("invalid key"))?;
    let found = match &*owner.borrow() {
        Object::Dict(dict) => dict.get(&name).cloned(),
        Object::Instance(instance) => instance.fields.get(&name).cloned(),
        Object::StructDef(def) => def.fields.get(&name).cloned(),
        Object::Module(module) => module.bindings.get(&name).cloned(),
        _ => return Err(usage("unsupported object type")),
    };
    Ok(found.unwrap_or_else(ObjectRef::nil))
}

/// `ord("a")`: code point of the first character.
pub(super) fn ord(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [value] = args else {
        return Err(usage("need one argument"));
    };
    let text = value.string_value().ok_or_else(|| usage("invalid type"))?;
    let first = text.chars().next().ok_or_else(|| usage("empty strings"))?;
    Ok(ObjectRef::int(i64::from(u32::from(first))))
}

/// `chr(97)`: one-character string for a code point.
pub(super) fn chr(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [value] = args else {
        return Err(usage("need one argument"));
    };
    let code = match &*value.borrow() {
        Object::Int(n) => *n,
        _ => return Err(usage("invalid type")),
    };
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(|c| ObjectRef::string(c.to_string()))
        .ok_or_else(|| usage("invalid code point"))
}

/// `dance(source[, bindings])`: run `source` in a fresh context.
///
/// Returns `[stdout, stderr]` (stderr is `nil` when empty), or
/// `[nil, message]` when the source fails.
pub(super) fn dance(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let (source, bindings) = match args {
        [source] => (source, None),
        [source, bindings] => (source, Some(bindings)),
        _ => return Err(usage("need one argument")),
    };
    let source = source
        .string_value()
        .ok_or_else(|| usage("invalid source code"))?;
    let bindings = match bindings {
        Some(value) => match &*value.borrow() {
            Object::Dict(dict) => dict.clone(),
            _ => return Err(usage("invalid context type. context will be dict")),
        },
        None => ObjectDict::new(),
    };

    let context = Rc::new(interp.context().detached());
    let mut child = Interpreter::builder(Rc::clone(&context))
        .bindings(bindings.iter().map(|(name, value)| (name, value.clone())))
        .build();
    let result = match child.execute(None, &source) {
        RunStatus::Completed | RunStatus::Exited(_) => {
            let stderr = child.stderr_text();
            let stderr = if stderr.is_empty() {
                ObjectRef::nil()
            } else {
                ObjectRef::string(stderr)
            };
            vec![ObjectRef::string(child.stdout_text()), stderr]
        }
        RunStatus::Failed => {
            let message = child.errors().first_error_message().unwrap_or_default();
            vec![ObjectRef::nil(), ObjectRef::string(message)]
        }
    };
    Ok(ObjectRef::array(result))
}

/// `exit(code)`: stop the whole run with `code`.
pub(super) fn exit(_: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    let [value] = args else {
        return Err(usage("invalid arguments length for exit"));
    };
    let code = match &*value.borrow() {
        Object::Int(n) => *n,
        _ => return Err(usage("invalid exit code type for exit")),
    };
    let code = i32::try_from(code).unwrap_or(if code < 0 { i32::MIN } else { i32::MAX });
    Err(ControlAction::Exit(code))
}

/// `die(...)`: write the arguments to stderr and exit with 1.
pub(super) fn die(interp: &mut Interpreter, args: &[ObjectRef]) -> EvalResult {
    interp.context().stderr().print(&display_line(args));
    Err(ControlAction::Exit(1))
}
