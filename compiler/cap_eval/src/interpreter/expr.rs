//! Expression evaluation.

use std::iter::Peekable;
use std::slice;

use cap_ir::{ChainOp, Expr, ExprKind, Formula};
use cap_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::{collapse_values, Interpreter};
use crate::binding::BindingKind;
use crate::builtins;
use crate::errors::{
    dict_key_not_string, index_out_of_range, invalid_index, key_not_found, no_attribute,
    not_defined, EvalError, EvalResult,
};
use crate::object::{Object, ObjectDict, ObjectRef};
use crate::operators::{evaluate_binary, evaluate_compare, evaluate_neg};

/// Evaluated call arguments. Most calls pass only a few.
pub(crate) type Args = SmallVec<[ObjectRef; 4]>;

impl Interpreter {
    /// Evaluate a formula, returning one value per assignment or test.
    pub(crate) fn eval_formula(&mut self, formula: &Formula) -> EvalResult<Vec<ObjectRef>> {
        match formula {
            Formula::AssignList(list) => list.iter().map(|assign| self.eval_assign(assign)).collect(),
            Formula::MultiAssign(lists) => match lists.as_slice() {
                [only] => only.tests.iter().map(|test| self.eval_expr(test)).collect(),
                _ => self.eval_multi_assign(lists),
            },
        }
    }

    /// Evaluate an expression.
    ///
    /// Errors raised without a location get this expression's span.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|action| action.with_span_if_error(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Or(left, right) => {
                let left = self.eval_expr(left)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.eval_expr(right)
            }
            ExprKind::And(left, right) => {
                let left = self.eval_expr(left)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                self.eval_expr(right)
            }
            ExprKind::Not(operand) => {
                let value = self.eval_expr(operand)?;
                Ok(ObjectRef::bool(!value.is_truthy()))
            }
            ExprKind::Compare { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(ObjectRef::bool(evaluate_compare(&left, &right, *op)?))
            }
            ExprKind::AugAssign { op, target, value } => self.eval_aug_assign(*op, target, value),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(evaluate_binary(&left, &right, *op)?)
            }
            ExprKind::Neg(operand) => {
                let value = self.eval_expr(operand)?;
                Ok(evaluate_neg(&value)?)
            }
            ExprKind::Chain { base, ops } => {
                let base = self.eval_expr(base)?;
                self.eval_chain_ops(base, ops)
            }
            ExprKind::Group(formula) => {
                let values = self.eval_formula(formula)?;
                Ok(collapse_values(values))
            }
            ExprKind::Nil => Ok(ObjectRef::nil()),
            ExprKind::Bool(b) => Ok(ObjectRef::bool(*b)),
            ExprKind::Int(n) => Ok(ObjectRef::int(*n)),
            ExprKind::Str(s) => Ok(ObjectRef::string(s.as_str())),
            ExprKind::Ident(name) => self.lookup_name(name),
            ExprKind::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let value = self.eval_assign(item)?;
                    values.push(BindingKind::bind(&value));
                }
                Ok(ObjectRef::array(values))
            }
            ExprKind::Dict(elems) => {
                let mut dict = ObjectDict::new();
                for elem in elems {
                    let key = self.eval_assign(&elem.key)?;
                    let Some(key) = key.string_value() else {
                        return Err(dict_key_not_string().with_span(elem.key.span).into());
                    };
                    let value = self.eval_assign(&elem.value)?;
                    dict.insert(key, BindingKind::bind(&value));
                }
                Ok(ObjectRef::dict(dict))
            }
        }
    }

    /// Resolve a name in the scope chain, then among the builtins.
    pub(crate) fn lookup_name(&self, name: &str) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        builtins::lookup(name).ok_or_else(|| not_defined(name).into())
    }

    /// Apply postfix operations left to right.
    ///
    /// `.name(args)` is a method call: the owner is kept so methods and
    /// builtin container methods can receive it.
    pub(crate) fn eval_chain_ops(&mut self, mut value: ObjectRef, ops: &[ChainOp]) -> EvalResult {
        let mut ops: Peekable<slice::Iter<'_, ChainOp>> = ops.iter().peekable();
        while let Some(op) = ops.next() {
            value = match op {
                ChainOp::Dot(name) => {
                    if let Some(ChainOp::Call(args, span)) =
                        ops.next_if(|next| matches!(next, ChainOp::Call(..)))
                    {
                        let args = self.eval_args(args)?;
                        self.call_method(&value, &name.name, &args)
                            .map_err(|a| a.with_span_if_error(*span))?
                    } else {
                        get_attribute(&value, &name.name).map_err(|e| e.with_span(name.span))?
                    }
                }
                ChainOp::Index(index, span) => {
                    let key = self.eval_assign(index)?;
                    get_index(&value, &key).map_err(|e| e.with_span(*span))?
                }
                ChainOp::Call(args, span) => {
                    let args = self.eval_args(args)?;
                    self.call_object(&value, &args)
                        .map_err(|a| a.with_span_if_error(*span))?
                }
            };
        }
        Ok(value)
    }

    fn eval_args(&mut self, args: &[Expr]) -> EvalResult<Args> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }
}

/// `owner[key]`.
pub(crate) fn get_index(owner: &ObjectRef, key: &ObjectRef) -> Result<ObjectRef, EvalError> {
    let object = owner.borrow();
    let key_object = key.borrow();
    match (&*object, &*key_object) {
        (Object::Array(items), Object::Int(index)) => usize::try_from(*index)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(index_out_of_range),
        (Object::Str(text), Object::Int(index)) => usize::try_from(*index)
            .ok()
            .and_then(|i| text.chars().nth(i))
            .map(|c| ObjectRef::string(c.to_string()))
            .ok_or_else(index_out_of_range),
        (Object::Dict(dict), Object::Str(name)) => {
            dict.get(name).cloned().ok_or_else(|| key_not_found(name))
        }
        (owner, key) => Err(invalid_index(owner.type_name(), key.type_name())),
    }
}

/// `owner.name` outside a call.
pub(crate) fn get_attribute(owner: &ObjectRef, name: &str) -> Result<ObjectRef, EvalError> {
    let object = owner.borrow();
    let found = match &*object {
        Object::Instance(instance) => instance.fields.get(name),
        Object::StructDef(def) => def.fields.get(name),
        Object::Module(module) => module.bindings.get(name),
        _ => None,
    };
    found.cloned().ok_or_else(|| no_attribute(name))
}
