//! Calls and definitions.
//!
//! A user function call binds arguments by position in a scope whose
//! parent is the function's defining scope. `return` unwinds to here as
//! [`ControlAction::Return`]. Loop depth is saved and cleared around the
//! body so a `break` inside a function cannot escape to a caller's loop.

use std::rc::Rc;

use cap_ir::{FuncDef, StructDef};
use cap_stack::ensure_sufficient_stack;
use smallvec::SmallVec;
use tracing::trace;

use super::expr::{get_attribute, Args};
use super::Interpreter;
use crate::binding::BindingKind;
use crate::environment::{LocalScope, Scope};
use crate::errors::{
    no_such_method, not_a_function, not_a_struct, not_callable, wrong_arg_count, ControlAction,
    EvalResult,
};
use crate::methods::dispatch_builtin_method;
use crate::object::{BuiltinFn, Function, Instance, Object, ObjectDict, ObjectKind, ObjectRef, StructValue};

/// What a call resolves to, copied out of the callee so no borrow is
/// held while the call runs.
enum Callee {
    Function(Rc<Function>),
    Builtin(BuiltinFn),
    Struct {
        def: Rc<StructDef>,
        parent: Option<ObjectRef>,
        scope: LocalScope<Scope>,
    },
}

impl Callee {
    fn of(value: &ObjectRef) -> Option<Callee> {
        match &*value.borrow() {
            Object::Function(func) => Some(Callee::Function(Rc::clone(func))),
            Object::Builtin(builtin) => Some(Callee::Builtin(builtin.func)),
            Object::StructDef(value) => Some(Callee::Struct {
                def: Rc::clone(&value.def),
                parent: value.parent.clone(),
                scope: value.scope.clone(),
            }),
            _ => None,
        }
    }
}

impl Interpreter {
    /// `callee(args)`.
    pub(crate) fn call_object(&mut self, callee: &ObjectRef, args: &[ObjectRef]) -> EvalResult {
        match Callee::of(callee) {
            Some(Callee::Function(func)) => self.call_function(callee, &func, args),
            Some(Callee::Builtin(func)) => func(self, args),
            Some(Callee::Struct { def, parent, scope }) => {
                if !args.is_empty() {
                    return Err(wrong_arg_count().into());
                }
                let fields = self.run_struct_body(&def, parent.as_ref(), &scope)?;
                Ok(ObjectRef::new(Object::Instance(Instance {
                    def: callee.clone(),
                    fields,
                })))
            }
            None => Err(not_callable().into()),
        }
    }

    /// `owner.name(args)`.
    ///
    /// Members of structs, instances and modules are looked up and called;
    /// a `met` member receives the owner as its first argument. Strings,
    /// arrays and dicts use their builtin methods.
    pub(crate) fn call_method(&mut self, owner: &ObjectRef, name: &str, args: &[ObjectRef]) -> EvalResult {
        match owner.kind() {
            ObjectKind::Instance | ObjectKind::StructDef | ObjectKind::Module => {
                let member = get_attribute(owner, name)?;
                let is_method = matches!(&*member.borrow(), Object::Function(f) if f.is_method());
                if is_method {
                    let mut full: Args = SmallVec::with_capacity(args.len() + 1);
                    full.push(owner.clone());
                    full.extend(args.iter().cloned());
                    self.call_object(&member, &full)
                } else {
                    self.call_object(&member, args)
                }
            }
            ObjectKind::Str | ObjectKind::Array | ObjectKind::Dict => {
                Ok(dispatch_builtin_method(owner, name, args)?)
            }
            kind => Err(no_such_method(name, kind.as_str()).into()),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(name = %func.name()))]
    fn call_function(&mut self, callee: &ObjectRef, func: &Rc<Function>, args: &[ObjectRef]) -> EvalResult {
        if args.len() != func.def.params.len() {
            return Err(wrong_arg_count().into());
        }

        let frame = self.new_frame(callee, Rc::clone(func));
        self.frames.push(frame);
        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        self.function_depth += 1;

        let result = self.with_scope(&func.scope, |scoped| {
            for (param, arg) in func.def.params.iter().zip(args) {
                scoped.env.define(param.name.as_str(), BindingKind::bind(arg));
            }
            if let Some(parent) = &func.extends {
                scoped.env.define("super", parent.clone());
            }
            ensure_sufficient_stack(|| scoped.exec_body(&func.def.body))
        });

        self.function_depth -= 1;
        self.loop_depth = saved_loop_depth;
        self.frames.pop();

        match result {
            Ok(()) => Ok(ObjectRef::nil()),
            Err(ControlAction::Return(value)) => Ok(value),
            Err(other) => Err(other),
        }
    }

    /// `def name(params) [extends parent]: ... end`
    pub(crate) fn define_function(&mut self, def: &Rc<FuncDef>) -> EvalResult<()> {
        let extends = match &def.extends {
            Some(parent) => {
                let value = self.lookup_name(&parent.name)?;
                if value.kind() != ObjectKind::Function {
                    return Err(not_a_function(&parent.name).with_span(parent.span).into());
                }
                Some(value)
            }
            None => None,
        };
        trace!(name = %def.name.name, extends = extends.is_some(), "define function");
        let func = Function {
            def: Rc::clone(def),
            scope: self.env.current().clone(),
            extends,
        };
        self.env.define(
            def.name.name.as_str(),
            ObjectRef::new(Object::Function(Rc::new(func))),
        );
        Ok(())
    }

    /// `struct Name [extends Parent]: ... end`
    ///
    /// The body runs once now so the definition itself has readable fields.
    pub(crate) fn define_struct(&mut self, def: &Rc<StructDef>) -> EvalResult<()> {
        let parent = match &def.extends {
            Some(parent) => {
                let value = self.lookup_name(&parent.name)?;
                if value.kind() != ObjectKind::StructDef {
                    return Err(not_a_struct(&parent.name).with_span(parent.span).into());
                }
                Some(value)
            }
            None => None,
        };
        let scope = self.env.current().clone();
        let fields = self.run_struct_body(def, parent.as_ref(), &scope)?;
        let value = StructValue {
            def: Rc::clone(def),
            parent,
            scope,
            fields,
        };
        self.env
            .define(def.name.name.as_str(), ObjectRef::new(Object::StructDef(value)));
        Ok(())
    }

    /// Run a struct body in a fresh child of `scope` and snapshot the
    /// bindings it made. A parent struct's bindings are made first.
    fn run_struct_body(
        &mut self,
        def: &StructDef,
        parent: Option<&ObjectRef>,
        scope: &LocalScope<Scope>,
    ) -> EvalResult<ObjectDict> {
        let inherited = match parent.and_then(Callee::of) {
            Some(Callee::Struct { def, parent, scope }) => {
                Some(self.run_struct_body(&def, parent.as_ref(), &scope)?)
            }
            _ => None,
        };
        self.with_scope(scope, |scoped| {
            if let Some(inherited) = &inherited {
                for (name, value) in inherited.iter() {
                    scoped.env.define(name, value.clone());
                }
            }
            scoped.exec_elems(&def.elems)?;
            let fields = scoped.env.current().borrow().bindings().clone();
            Ok(fields)
        })
    }
}
