//! Builtin methods on strings, arrays and dicts.
//!
//! Called as `owner.name(args)` when the owner is a builtin container.
//! Dispatch matches on the owner's kind, then on the method name.

mod collections;
mod string;

use crate::errors::{no_such_method, wrong_arg_count, EvalError};
use crate::object::{ObjectKind, ObjectRef};

pub(crate) type MethodResult = Result<ObjectRef, EvalError>;

/// Dispatch `owner.method(args)` for a builtin owner type.
pub fn dispatch_builtin_method(owner: &ObjectRef, method: &str, args: &[ObjectRef]) -> MethodResult {
    match owner.kind() {
        ObjectKind::Str => {
            let text = owner.string_value().unwrap_or_default();
            string::dispatch(&text, method, args)
        }
        ObjectKind::Array => collections::dispatch_array(owner, method, args),
        ObjectKind::Dict => collections::dispatch_dict(owner, method, args),
        kind => Err(no_such_method(method, kind.as_str())),
    }
}

/// Error unless exactly `expected` arguments were passed.
#[inline]
fn require_args(expected: usize, args: &[ObjectRef]) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(wrong_arg_count())
    }
}
