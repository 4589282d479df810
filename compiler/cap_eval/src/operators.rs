//! Binary, comparison and unary operators.
//!
//! The object set is closed, so operators dispatch by matching on the
//! operand pair. Booleans take part in arithmetic and ordering as 0 and 1.

use cap_ir::{BinaryOp, CompareOp};
use rustc_hash::FxHashSet;

use crate::errors::{
    integer_overflow, negative_repeat, unsupported_operand, unsupported_operands, zero_division,
    EvalError,
};
use crate::object::{Object, ObjectDict, ObjectRef};

type OpResult = Result<ObjectRef, EvalError>;

#[inline]
fn checked_arith(result: Option<i64>, op: BinaryOp) -> OpResult {
    result
        .map(ObjectRef::int)
        .ok_or_else(|| integer_overflow(op.as_symbol()))
}

#[inline]
fn checked_div(divisor: i64, op: BinaryOp, f: impl FnOnce() -> Option<i64>) -> OpResult {
    if divisor == 0 {
        return Err(zero_division());
    }
    checked_arith(f(), op)
}

fn mismatch(op: &'static str, left: &Object, right: &Object) -> EvalError {
    unsupported_operands(op, left.type_name(), right.type_name())
}

/// Apply `+ - * / %`.
///
/// Numbers combine with numbers, strings concatenate with `+`, and a
/// string times a number repeats it. Everything else is an error.
pub fn evaluate_binary(left: &ObjectRef, right: &ObjectRef, op: BinaryOp) -> OpResult {
    let (l, r) = (left.borrow(), right.borrow());
    if let (Some(a), Some(b)) = (l.as_number(), r.as_number()) {
        return eval_int_binary(a, b, op);
    }
    match (&*l, &*r, op) {
        (Object::Str(a), Object::Str(b), BinaryOp::Add) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(ObjectRef::string(joined))
        }
        (Object::Str(s), other, BinaryOp::Mul) => match other.as_number() {
            Some(count) => repeat_string(s, count),
            None => Err(mismatch(op.as_symbol(), &l, &r)),
        },
        _ => Err(mismatch(op.as_symbol(), &l, &r)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), op),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div => checked_div(b, op, || a.checked_div(b)),
        BinaryOp::Mod => checked_div(b, op, || a.checked_rem(b)),
    }
}

fn repeat_string(s: &str, count: i64) -> OpResult {
    let count = usize::try_from(count).map_err(|_| negative_repeat())?;
    if s.len().checked_mul(count).is_none() {
        return Err(integer_overflow("*"));
    }
    Ok(ObjectRef::string(s.repeat(count)))
}

/// Evaluate a comparison.
///
/// `==` and `!=` are defined for every pair; ordering only for numbers.
pub fn evaluate_compare(left: &ObjectRef, right: &ObjectRef, op: CompareOp) -> Result<bool, EvalError> {
    match op {
        CompareOp::Eq => Ok(objects_equal(left, right)),
        CompareOp::NotEq => Ok(!objects_equal(left, right)),
        CompareOp::Lt | CompareOp::LtEq | CompareOp::Gt | CompareOp::GtEq => {
            let (l, r) = (left.borrow(), right.borrow());
            let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
                return Err(mismatch(op.as_symbol(), &l, &r));
            };
            Ok(match op {
                CompareOp::Lt => a < b,
                CompareOp::LtEq => a <= b,
                CompareOp::Gt => a > b,
                _ => a >= b,
            })
        }
    }
}

/// Equality used by `==`.
///
/// Numbers (with booleans as 0 and 1) and strings compare by value, arrays
/// and dicts element by element, `nil` equals only `nil`, and every other
/// object only itself. Containers that reach themselves compare equal when
/// no finite difference exists: a pair already under comparison is assumed
/// equal on re-entry.
pub fn objects_equal(left: &ObjectRef, right: &ObjectRef) -> bool {
    equal_tracking(left, right, &mut FxHashSet::default())
}

/// Pairs of container ids currently on the comparison path.
type ActivePairs = FxHashSet<(i64, i64)>;

fn equal_tracking(left: &ObjectRef, right: &ObjectRef, active: &mut ActivePairs) -> bool {
    if left.ptr_eq(right) {
        return true;
    }
    let (l, r) = (left.borrow(), right.borrow());
    if let (Some(a), Some(b)) = (l.as_number(), r.as_number()) {
        return a == b;
    }
    match (&*l, &*r) {
        (Object::Nil, Object::Nil) => true,
        (Object::Str(a), Object::Str(b)) => a == b,
        (Object::Array(a), Object::Array(b)) => {
            a.len() == b.len()
                && nested(left, right, active, |active| {
                    a.iter().zip(b).all(|(x, y)| equal_tracking(x, y, active))
                })
        }
        (Object::Dict(a), Object::Dict(b)) => {
            a.len() == b.len() && nested(left, right, active, |active| dicts_equal(a, b, active))
        }
        _ => false,
    }
}

fn nested(
    left: &ObjectRef,
    right: &ObjectRef,
    active: &mut ActivePairs,
    compare: impl FnOnce(&mut ActivePairs) -> bool,
) -> bool {
    let pair = (left.id(), right.id());
    if !active.insert(pair) {
        return true;
    }
    let equal = cap_stack::ensure_sufficient_stack(|| compare(active));
    active.remove(&pair);
    equal
}

fn dicts_equal(a: &ObjectDict, b: &ObjectDict, active: &mut ActivePairs) -> bool {
    a.iter().all(|(key, value)| {
        b.get(key)
            .is_some_and(|other| equal_tracking(value, other, active))
    })
}

/// Unary minus.
pub fn evaluate_neg(operand: &ObjectRef) -> OpResult {
    let object = operand.borrow();
    match object.as_number() {
        Some(n) => n
            .checked_neg()
            .map(ObjectRef::int)
            .ok_or_else(|| integer_overflow("-")),
        None => Err(unsupported_operand("-", object.type_name())),
    }
}
