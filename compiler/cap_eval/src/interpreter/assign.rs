//! Assignment: plain, chained, multi-target and compound.

use cap_ir::{Assign, AugOp, ChainOp, Expr, ExprKind, TestList};

use super::expr::{get_attribute, get_index};
use super::Interpreter;
use crate::binding::BindingKind;
use crate::environment::AssignError;
use crate::errors::{
    array_length_mismatch, index_out_of_range, invalid_index, invalid_left_hand_operand,
    nonlocal_not_found, not_defined, read_only_attribute, string_index_assign, EvalError,
    EvalResult,
};
use crate::object::{Object, ObjectRef};
use crate::operators::evaluate_binary;

/// A resolved assignment target.
enum Place {
    Name(String),
    Attr(ObjectRef, String),
    Index(ObjectRef, ObjectRef),
}

/// Index key extracted before the owner is borrowed mutably, so
/// `a[a] = x` does not overlap borrows.
enum IndexKey {
    Int(i64),
    Str(String),
    Other(&'static str),
}

impl Interpreter {
    /// `t1 = t2 = ... = value`, or just `value` when there are no targets.
    ///
    /// Every target receives the same handle, so chained targets share
    /// identity with each other.
    pub(crate) fn eval_assign(&mut self, assign: &Assign) -> EvalResult {
        let value = self.eval_expr(&assign.value)?;
        if assign.targets.is_empty() {
            return Ok(value);
        }
        let bound = BindingKind::bind(&value);
        for target in assign.targets.iter().rev() {
            let place = self.resolve_place(target)?;
            self.store(place, bound.clone())
                .map_err(|e| e.with_span(target.span))?;
        }
        Ok(bound)
    }

    /// `a, b = c, d = 1, 2`: the last list holds the values; the target
    /// lists are assigned right to left.
    pub(crate) fn eval_multi_assign(&mut self, lists: &[TestList]) -> EvalResult<Vec<ObjectRef>> {
        let Some((values, targets)) = lists.split_last() else {
            return Ok(Vec::new());
        };
        let values = values
            .tests
            .iter()
            .map(|test| self.eval_expr(test))
            .collect::<EvalResult<Vec<_>>>()?;
        for list in targets.iter().rev() {
            self.assign_targets(&list.tests, &values)
                .map_err(|a| a.with_span_if_error(list.span))?;
        }
        Ok(values)
    }

    fn assign_targets(&mut self, targets: &[Expr], values: &[ObjectRef]) -> EvalResult<()> {
        if targets.len() == values.len() {
            return self.assign_pairwise(targets, values);
        }
        if let [target] = targets {
            let items = values.iter().map(BindingKind::bind).collect();
            let place = self.resolve_place(target)?;
            return Ok(self.store(place, ObjectRef::array(items))?);
        }
        if let [single] = values {
            let items = match &*single.borrow() {
                Object::Array(items) if items.len() == targets.len() => Some(items.clone()),
                _ => None,
            };
            if let Some(items) = items {
                return self.assign_pairwise(targets, &items);
            }
        }
        Err(array_length_mismatch().into())
    }

    fn assign_pairwise(&mut self, targets: &[Expr], values: &[ObjectRef]) -> EvalResult<()> {
        for (target, value) in targets.iter().zip(values) {
            let place = self.resolve_place(target)?;
            self.store(place, BindingKind::bind(value))
                .map_err(|e| e.with_span(target.span))?;
        }
        Ok(())
    }

    /// `target op= value`. Returns the new value.
    pub(crate) fn eval_aug_assign(&mut self, op: AugOp, target: &Expr, value: &Expr) -> EvalResult {
        let place = self.resolve_place(target)?;
        let current = match &place {
            Place::Name(name) => self.env.lookup(name).ok_or_else(|| not_defined(name))?,
            Place::Attr(owner, name) => get_attribute(owner, name)?,
            Place::Index(owner, key) => get_index(owner, key)?,
        };
        let rhs = self.eval_expr(value)?;
        let result = evaluate_binary(&current, &rhs, op.binary_op())?;
        match place {
            Place::Name(name) => {
                let declared = self.env.current().borrow().declared(&name).is_some();
                let stored = if declared {
                    self.env.bind(&name, result.clone())
                } else {
                    self.env.assign(&name, result.clone())
                };
                stored.map_err(|AssignError::Undefined| not_defined(&name))?;
            }
            place => self.store(place, result.clone())?,
        }
        Ok(result)
    }

    /// Work out where an assignment target points. Owners and index keys
    /// are evaluated here; the stored value is not.
    fn resolve_place(&mut self, target: &Expr) -> EvalResult<Place> {
        match &target.kind {
            ExprKind::Ident(name) => Ok(Place::Name(name.clone())),
            ExprKind::Chain { base, ops } => {
                let Some((last, init)) = ops.split_last() else {
                    return Err(invalid_left_hand_operand().into());
                };
                let base = self.eval_expr(base)?;
                let owner = self.eval_chain_ops(base, init)?;
                match last {
                    ChainOp::Dot(name) => Ok(Place::Attr(owner, name.name.clone())),
                    ChainOp::Index(index, _) => {
                        let key = self.eval_assign(index)?;
                        Ok(Place::Index(owner, key))
                    }
                    ChainOp::Call(..) => Err(invalid_left_hand_operand().into()),
                }
            }
            _ => Err(invalid_left_hand_operand().into()),
        }
    }

    fn store(&mut self, place: Place, value: ObjectRef) -> Result<(), EvalError> {
        match place {
            Place::Name(name) => self
                .env
                .bind(&name, value)
                .map_err(|AssignError::Undefined| nonlocal_not_found(&name)),
            Place::Attr(owner, name) => set_attribute(&owner, name, value),
            Place::Index(owner, key) => set_index(&owner, &key, value),
        }
    }
}

fn set_attribute(owner: &ObjectRef, name: String, value: ObjectRef) -> Result<(), EvalError> {
    match &mut *owner.borrow_mut() {
        Object::Instance(instance) => instance.fields.insert(name, value),
        Object::StructDef(def) => def.fields.insert(name, value),
        Object::Module(module) => module.bindings.insert(name, value),
        other => return Err(read_only_attribute(&name, other.type_name())),
    };
    Ok(())
}

fn set_index(owner: &ObjectRef, key: &ObjectRef, value: ObjectRef) -> Result<(), EvalError> {
    let key = match &*key.borrow() {
        Object::Int(n) => IndexKey::Int(*n),
        Object::Str(s) => IndexKey::Str(s.clone()),
        other => IndexKey::Other(other.type_name()),
    };
    match (&mut *owner.borrow_mut(), key) {
        (Object::Array(items), IndexKey::Int(index)) => {
            let slot = usize::try_from(index)
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(index_out_of_range)?;
            *slot = value;
            Ok(())
        }
        (Object::Str(_), _) => Err(string_index_assign()),
        (Object::Dict(dict), IndexKey::Str(name)) => {
            dict.insert(name, value);
            Ok(())
        }
        (owner, key) => {
            let key_type = match key {
                IndexKey::Int(_) => "int",
                IndexKey::Str(_) => "string",
                IndexKey::Other(name) => name,
            };
            Err(invalid_index(owner.type_name(), key_type))
        }
    }
}
