//! Array and dict methods. Both mutate the owner in place.

use super::{require_args, MethodResult};
use crate::binding::BindingKind;
use crate::errors::{invalid_key, method_usage, missing_key, no_such_method, EvalError};
use crate::object::{Object, ObjectRef};

pub(super) fn dispatch_array(owner: &ObjectRef, method: &str, args: &[ObjectRef]) -> MethodResult {
    match method {
        "push" => {
            if args.len() != 1 {
                return Err(method_usage("can't invoke array.push. need one argument"));
            }
            let item = BindingKind::bind(&args[0]);
            if let Object::Array(items) = &mut *owner.borrow_mut() {
                items.push(item);
            }
            Ok(owner.clone())
        }
        "pop" => {
            require_args(0, args)?;
            let popped = match &mut *owner.borrow_mut() {
                Object::Array(items) => items.pop(),
                _ => None,
            };
            Ok(popped.unwrap_or_else(ObjectRef::nil))
        }
        _ => Err(no_such_method(method, "array")),
    }
}

pub(super) fn dispatch_dict(owner: &ObjectRef, method: &str, args: &[ObjectRef]) -> MethodResult {
    match method {
        "get" => {
            let (key, default) = key_and_default("can't invoke dict.get(). need one or two argument", args)?;
            let Some(key) = key else {
                return default.cloned().ok_or_else(missing_key);
            };
            let found = match &*owner.borrow() {
                Object::Dict(dict) => dict.get(&key).cloned(),
                _ => None,
            };
            Ok(found
                .or_else(|| default.cloned())
                .unwrap_or_else(ObjectRef::nil))
        }
        "pop" => {
            let (key, default) = key_and_default("can't invoke dict.pop(). need one or two argument", args)?;
            let popped = match (&mut *owner.borrow_mut(), key) {
                (Object::Dict(dict), Some(key)) => dict.remove(&key),
                _ => None,
            };
            popped
                .or_else(|| default.cloned())
                .ok_or_else(invalid_key)
        }
        _ => Err(no_such_method(method, "dict")),
    }
}

/// Split `(key[, default])`. The key is `None` when it is not a string.
fn key_and_default<'a>(
    usage: &'static str,
    args: &'a [ObjectRef],
) -> Result<(Option<String>, Option<&'a ObjectRef>), EvalError> {
    match args {
        [key] => Ok((key.string_value(), None)),
        [key, default] => Ok((key.string_value(), Some(default))),
        _ => Err(method_usage(usage)),
    }
}
