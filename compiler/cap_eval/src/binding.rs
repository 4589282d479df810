//! Copy-versus-share rule for name binding.
//!
//! Every place that stores a value under a name or into a container goes
//! through [`BindingKind::bind`]. Scalars get a fresh handle so that
//! `b = a` leaves `id(a) != id(b)`; containers, functions, modules and
//! struct values keep their identity.

use crate::object::{Object, ObjectRef};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BindingKind {
    /// Bind a fresh copy of the value.
    CopyScalar,
    /// Bind the same handle.
    ShareHandle,
}

impl BindingKind {
    pub fn of(object: &Object) -> Self {
        match object {
            Object::Nil | Object::Bool(_) | Object::Int(_) | Object::Str(_) => {
                BindingKind::CopyScalar
            }
            Object::Array(_)
            | Object::Dict(_)
            | Object::Function(_)
            | Object::Builtin(_)
            | Object::Module(_)
            | Object::StructDef(_)
            | Object::Instance(_) => BindingKind::ShareHandle,
        }
    }

    /// The handle to store for `value`.
    pub fn bind(value: &ObjectRef) -> ObjectRef {
        let kind = BindingKind::of(&value.borrow());
        match kind {
            BindingKind::CopyScalar => value.shallow_copy(),
            BindingKind::ShareHandle => value.clone(),
        }
    }
}
