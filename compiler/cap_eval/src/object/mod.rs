//! Runtime object model.
//!
//! Every runtime value lives behind an [`ObjectRef`], a reference-counted
//! handle. Two handles are the same object when they point at the same
//! allocation; that identity is what containers, function parameters and
//! chained assignment share. `id()` reports a serial number handed out when
//! the object is created, so it never repeats after an object is freed.
//!
//! Reference cycles (an array holding itself, a struct instance stored in
//! its own field) are never collected.

mod dict;

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use cap_ir::{FuncDef, StructDef};
use rustc_hash::FxHashMap;

use crate::environment::{LocalScope, Scope};
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;

pub use dict::ObjectDict;

/// Handle to a runtime object.
pub struct ObjectRef(Rc<Slot>);

struct Slot {
    serial: i64,
    object: RefCell<Object>,
}

thread_local! {
    static NEXT_SERIAL: Cell<i64> = const { Cell::new(1) };
}

fn next_serial() -> i64 {
    NEXT_SERIAL.with(|next| {
        let serial = next.get();
        next.set(serial.wrapping_add(1));
        serial
    })
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Object {
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    Array(Vec<ObjectRef>),
    Dict(ObjectDict),
    Function(Rc<Function>),
    Builtin(BuiltinFunction),
    Module(Module),
    StructDef(StructValue),
    Instance(Instance),
}

/// Tag of an [`Object`], without its payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Nil,
    Bool,
    Int,
    Str,
    Array,
    Dict,
    Function,
    Builtin,
    Module,
    StructDef,
    Instance,
}

impl ObjectKind {
    /// Name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Nil => "nil",
            ObjectKind::Bool => "bool",
            ObjectKind::Int => "int",
            ObjectKind::Str => "string",
            ObjectKind::Array => "array",
            ObjectKind::Dict => "dict",
            ObjectKind::Function => "function",
            ObjectKind::Builtin => "builtin function",
            ObjectKind::Module => "module",
            ObjectKind::StructDef => "struct",
            ObjectKind::Instance => "object",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user function: its definition and the scope it closes over.
pub struct Function {
    pub def: Rc<FuncDef>,
    /// Scope active where the `def` ran. Free names resolve here.
    pub scope: LocalScope<Scope>,
    /// Function named by `extends`, called by `super()`.
    pub extends: Option<ObjectRef>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.def.name.name
    }

    pub fn is_method(&self) -> bool {
        self.def.is_method
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("params", &self.def.params.len())
            .field("extends", &self.extends.is_some())
            .finish_non_exhaustive()
    }
}

/// Signature shared by every builtin function and builtin method-like
/// module member.
pub type BuiltinFn = fn(&mut Interpreter, &[ObjectRef]) -> EvalResult;

#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

/// Namespace produced by `import`, or a builtin module like `opts`.
#[derive(Clone, Debug)]
pub struct Module {
    pub name: String,
    pub bindings: ObjectDict,
}

/// A struct definition.
#[derive(Clone, Debug)]
pub struct StructValue {
    pub def: Rc<StructDef>,
    pub parent: Option<ObjectRef>,
    /// Scope active where the `struct` ran; each construction runs the body
    /// in a child of it.
    pub scope: LocalScope<Scope>,
    /// Bindings produced by running the body once at definition time.
    pub fields: ObjectDict,
}

impl StructValue {
    pub fn name(&self) -> &str {
        &self.def.name.name
    }
}

/// A constructed struct.
#[derive(Clone, Debug)]
pub struct Instance {
    /// The [`StructValue`] this was built from.
    pub def: ObjectRef,
    pub fields: ObjectDict,
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Nil => ObjectKind::Nil,
            Object::Bool(_) => ObjectKind::Bool,
            Object::Int(_) => ObjectKind::Int,
            Object::Str(_) => ObjectKind::Str,
            Object::Array(_) => ObjectKind::Array,
            Object::Dict(_) => ObjectKind::Dict,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::Module(_) => ObjectKind::Module,
            Object::StructDef(_) => ObjectKind::StructDef,
            Object::Instance(_) => ObjectKind::Instance,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Truthiness used by `if`, `for`, `not`, `and`, `or` and `assert`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Nil => false,
            Object::Bool(b) => *b,
            Object::Int(n) => *n != 0,
            Object::Str(s) => !s.is_empty(),
            Object::Array(_)
            | Object::Dict(_)
            | Object::Function(_)
            | Object::Builtin(_)
            | Object::Module(_)
            | Object::StructDef(_)
            | Object::Instance(_) => true,
        }
    }

    /// Integer view for arithmetic and ordering. Booleans count as 0 and 1.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Object::Int(n) => Some(*n),
            Object::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Text written by `puts` and `{: ... :}`.
    pub fn to_display_string(&self) -> String {
        match self {
            Object::Nil => "nil".to_string(),
            Object::Bool(b) => b.to_string(),
            Object::Int(n) => n.to_string(),
            Object::Str(s) => s.clone(),
            Object::Array(_) => "(array)".to_string(),
            Object::Dict(_) => "(dict)".to_string(),
            Object::Function(_) => "(function)".to_string(),
            Object::Builtin(_) => "(builtin function)".to_string(),
            Object::Module(_) => "(module)".to_string(),
            Object::StructDef(_) => "(struct)".to_string(),
            Object::Instance(_) => "(object)".to_string(),
        }
    }
}

impl ObjectRef {
    pub fn new(object: Object) -> Self {
        ObjectRef(Rc::new(Slot {
            serial: next_serial(),
            object: RefCell::new(object),
        }))
    }

    pub fn nil() -> Self {
        ObjectRef::new(Object::Nil)
    }

    pub fn bool(value: bool) -> Self {
        ObjectRef::new(Object::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        ObjectRef::new(Object::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        ObjectRef::new(Object::Str(value.into()))
    }

    pub fn array(items: Vec<ObjectRef>) -> Self {
        ObjectRef::new(Object::Array(items))
    }

    pub fn dict(dict: ObjectDict) -> Self {
        ObjectRef::new(Object::Dict(dict))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.object.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.object.borrow_mut()
    }

    /// Serial number assigned at creation. Unique for the life of the
    /// thread, unlike the allocation address.
    pub fn id(&self) -> i64 {
        self.0.serial
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn kind(&self) -> ObjectKind {
        self.borrow().kind()
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_truthy(&self) -> bool {
        self.borrow().is_truthy()
    }

    pub fn to_display_string(&self) -> String {
        self.borrow().to_display_string()
    }

    pub fn as_number(&self) -> Option<i64> {
        self.borrow().as_number()
    }

    /// Owned copy of the string payload, if this is a string.
    pub fn string_value(&self) -> Option<String> {
        self.borrow().as_str().map(str::to_string)
    }

    /// New handle with a copy of this object's payload. Container elements
    /// stay shared.
    #[must_use]
    pub fn shallow_copy(&self) -> ObjectRef {
        ObjectRef::new(self.borrow().clone())
    }

    /// New handle with containers copied recursively. Shared sub-objects
    /// and cycles are reproduced in the copy rather than duplicated.
    #[must_use]
    pub fn deep_copy(&self) -> ObjectRef {
        let mut seen = FxHashMap::default();
        self.deep_copy_with(&mut seen)
    }

    fn deep_copy_with(&self, seen: &mut FxHashMap<i64, ObjectRef>) -> ObjectRef {
        if let Some(copy) = seen.get(&self.id()) {
            return copy.clone();
        }
        cap_stack::ensure_sufficient_stack(|| {
            let copy = ObjectRef::nil();
            seen.insert(self.id(), copy.clone());
            let object = match &*self.borrow() {
                Object::Array(items) => {
                    Object::Array(items.iter().map(|i| i.deep_copy_with(seen)).collect())
                }
                Object::Dict(dict) => Object::Dict(deep_copy_dict(dict, seen)),
                Object::Instance(instance) => Object::Instance(Instance {
                    def: instance.def.clone(),
                    fields: deep_copy_dict(&instance.fields, seen),
                }),
                other => other.clone(),
            };
            *copy.borrow_mut() = object;
            copy
        })
    }
}

fn deep_copy_dict(dict: &ObjectDict, seen: &mut FxHashMap<i64, ObjectRef>) -> ObjectDict {
    dict.iter()
        .map(|(key, value)| (key, value.deep_copy_with(seen)))
        .collect()
}

impl Clone for ObjectRef {
    #[inline]
    fn clone(&self) -> Self {
        ObjectRef(Rc::clone(&self.0))
    }
}

/// Shallow: scalars print their value, everything else its kind and id,
/// so cyclic structures format finitely.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.object.try_borrow() {
            Ok(object) => match &*object {
                Object::Nil => f.write_str("nil"),
                Object::Bool(b) => write!(f, "{b}"),
                Object::Int(n) => write!(f, "{n}"),
                Object::Str(s) => write!(f, "{s:?}"),
                other => write!(f, "<{} #{}>", other.type_name(), self.id()),
            },
            Err(_) => write!(f, "<borrowed #{}>", self.id()),
        }
    }
}
