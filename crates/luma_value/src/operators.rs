//! Binary operator implementations.
//!
//! Each operator first tries the native rule for its operand kinds, then
//! falls back to a metatable handler, and only then fails. Dispatch is a
//! direct match on [`BinaryOp`]; the operator set is closed.

use std::ops;

use crate::errors::{
    arithmetic_on, bitwise_on, compare, concatenate, no_integer_representation, EvalError,
    EvalResult,
};
use crate::metatable::{binary_handler, call_handler, compare_handler, MetaEvent};
use crate::multi;
use crate::unary_operators::{evaluate_unary, UnaryOp};
use crate::value::{Value, Variant};

/// Binary operators of the protocol.
///
/// `Gt` and `GtEq` are the swapped forms of `Lt` and `LtEq`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinaryOp {
    /// The metatable event consulted when the native rule does not apply.
    ///
    /// Comparisons report the event of their unswapped form.
    pub const fn event(self) -> MetaEvent {
        match self {
            BinaryOp::Add => MetaEvent::Add,
            BinaryOp::Sub => MetaEvent::Sub,
            BinaryOp::Mul => MetaEvent::Mul,
            BinaryOp::Div => MetaEvent::Div,
            BinaryOp::Mod => MetaEvent::Mod,
            BinaryOp::Pow => MetaEvent::Pow,
            BinaryOp::Concat => MetaEvent::Concat,
            BinaryOp::Eq | BinaryOp::NotEq => MetaEvent::Eq,
            BinaryOp::Lt | BinaryOp::Gt => MetaEvent::Lt,
            BinaryOp::LtEq | BinaryOp::GtEq => MetaEvent::Le,
            BinaryOp::BitAnd => MetaEvent::BAnd,
            BinaryOp::BitOr => MetaEvent::BOr,
            BinaryOp::BitXor => MetaEvent::BXor,
            BinaryOp::Shl => MetaEvent::Shl,
            BinaryOp::Shr => MetaEvent::Shr,
        }
    }
}

// Direct Dispatch Function

/// Evaluate a binary operation.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Pow => eval_arith(left, right, op),
        BinaryOp::Concat => eval_concat(left, right),
        BinaryOp::Eq => equals(left, right).map(Value::boolean),
        BinaryOp::NotEq => equals(left, right).map(|eq| Value::boolean(!eq)),
        BinaryOp::Lt => less_than(left, right).map(Value::boolean),
        BinaryOp::LtEq => less_equal(left, right).map(Value::boolean),
        BinaryOp::Gt => less_than(right, left).map(Value::boolean),
        BinaryOp::GtEq => less_equal(right, left).map(Value::boolean),
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Shr => eval_bitwise(left, right, op),
    }
}

/// Call the handler for `event` with both operands, or fail with `error`.
fn dispatch(
    left: &Value,
    right: &Value,
    event: MetaEvent,
    error: impl FnOnce() -> EvalError,
) -> EvalResult {
    match binary_handler(left, right, event) {
        Some(handler) => call_handler(&handler, event, multi![left, right]),
        None => Err(error()),
    }
}

// Arithmetic

fn eval_arith(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    if let (Some(a), Some(b)) = (left.try_number(), right.try_number()) {
        return Ok(Value::number(arith_numbers(a, b, op)));
    }
    dispatch(left, right, op.event(), || {
        let culprit = if left.is_number_convertible() { right } else { left };
        arithmetic_on(culprit.type_name())
    })
}

fn arith_numbers(a: f64, b: f64, op: BinaryOp) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        // Floored: the result takes the sign of the divisor.
        BinaryOp::Mod => a - (a / b).floor() * b,
        BinaryOp::Pow => a.powf(b),
        _ => f64::NAN,
    }
}

// Concatenation

fn eval_concat(left: &Value, right: &Value) -> EvalResult {
    if let (Ok(a), Ok(b)) = (left.to_text(), right.to_text()) {
        return Ok(Value::string(a + &b));
    }
    dispatch(left, right, MetaEvent::Concat, || {
        let culprit = if left.is_text_convertible() { right } else { left };
        concatenate(culprit.type_name())
    })
}

// Equality

/// Protocol equality.
///
/// Values of different kinds are never equal and identical storage always
/// is. Tables and functions consult `__eq` only when both operands resolve
/// the same handler.
pub(crate) fn equals(left: &Value, right: &Value) -> Result<bool, EvalError> {
    if left.kind() != right.kind() {
        return Ok(false);
    }
    if left.ptr_eq(right) {
        return Ok(true);
    }
    if !left.kind().is_reference() {
        return Ok(left.raw_equal(right));
    }
    match compare_handler(left, right, MetaEvent::Eq) {
        Some(handler) => {
            Ok(call_handler(&handler, MetaEvent::Eq, multi![left, right])?.to_boolean())
        }
        None => Ok(false),
    }
}

// Ordering

/// Native ordering for two numbers or two strings.
fn native_less(left: &Value, right: &Value, or_equal: bool) -> Option<bool> {
    match (left.variant(), right.variant()) {
        (Variant::Number(a), Variant::Number(b)) => Some(if or_equal { a <= b } else { a < b }),
        (Variant::String(a), Variant::String(b)) => Some(if or_equal { a <= b } else { a < b }),
        _ => None,
    }
}

fn call_compare(
    handler: &Value,
    event: MetaEvent,
    left: &Value,
    right: &Value,
) -> Result<bool, EvalError> {
    Ok(call_handler(handler, event, multi![left, right])?.to_boolean())
}

pub(crate) fn less_than(left: &Value, right: &Value) -> Result<bool, EvalError> {
    if let Some(result) = native_less(left, right, false) {
        return Ok(result);
    }
    match compare_handler(left, right, MetaEvent::Lt) {
        Some(handler) => call_compare(&handler, MetaEvent::Lt, left, right),
        None => Err(compare(left.type_name(), right.type_name())),
    }
}

/// `left <= right`, falling back to `not (right < left)` through `__lt`
/// when no `__le` handler resolves.
pub(crate) fn less_equal(left: &Value, right: &Value) -> Result<bool, EvalError> {
    if let Some(result) = native_less(left, right, true) {
        return Ok(result);
    }
    if let Some(handler) = compare_handler(left, right, MetaEvent::Le) {
        return call_compare(&handler, MetaEvent::Le, left, right);
    }
    match compare_handler(right, left, MetaEvent::Lt) {
        Some(handler) => Ok(!call_compare(&handler, MetaEvent::Lt, right, left)?),
        None => Err(compare(left.type_name(), right.type_name())),
    }
}

// Bitwise

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// The exact 64-bit integer a number represents, if any.
pub(crate) fn to_integer(n: f64) -> Result<i64, EvalError> {
    if n.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&n) {
        Ok(n as i64)
    } else {
        Err(no_integer_representation())
    }
}

fn eval_bitwise(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    if let (Some(a), Some(b)) = (left.try_number(), right.try_number()) {
        let (a, b) = (to_integer(a)?, to_integer(b)?);
        let result = match op {
            BinaryOp::BitAnd => a & b,
            BinaryOp::BitOr => a | b,
            BinaryOp::BitXor => a ^ b,
            BinaryOp::Shl => shift_left(a, b),
            _ => shift_left(a, b.saturating_neg()),
        };
        return Ok(Value::number(result as f64));
    }
    dispatch(left, right, op.event(), || {
        let culprit = if left.is_number_convertible() { right } else { left };
        bitwise_on(culprit.type_name())
    })
}

/// Logical shift; negative counts shift right, counts of 64 or more yield 0.
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    reason = "logical shifts reinterpret the two's-complement bit pattern"
)]
fn shift_left(value: i64, count: i64) -> i64 {
    let bits = value as u64;
    let shifted = match u32::try_from(count.unsigned_abs()) {
        Ok(n) if n < 64 => {
            if count >= 0 {
                bits << n
            } else {
                bits >> n
            }
        }
        _ => 0,
    };
    shifted as i64
}

// Value entry points

impl Value {
    /// Apply a binary operator with `self` as the left operand.
    pub fn arith(&self, op: BinaryOp, other: &Value) -> EvalResult {
        evaluate_binary(self, other, op)
    }

    pub fn concat(&self, other: &Value) -> EvalResult {
        eval_concat(self, other)
    }

    pub fn equals(&self, other: &Value) -> Result<bool, EvalError> {
        equals(self, other)
    }

    pub fn not_equals(&self, other: &Value) -> Result<bool, EvalError> {
        equals(self, other).map(|eq| !eq)
    }

    pub fn less_than(&self, other: &Value) -> Result<bool, EvalError> {
        less_than(self, other)
    }

    pub fn less_equal(&self, other: &Value) -> Result<bool, EvalError> {
        less_equal(self, other)
    }

    pub fn greater_than(&self, other: &Value) -> Result<bool, EvalError> {
        less_than(other, self)
    }

    pub fn greater_equal(&self, other: &Value) -> Result<bool, EvalError> {
        less_equal(other, self)
    }
}

macro_rules! impl_binary_op {
    ($($trait:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl ops::$trait<&Value> for &Value {
                type Output = EvalResult;

                fn $method(self, rhs: &Value) -> EvalResult {
                    evaluate_binary(self, rhs, BinaryOp::$op)
                }
            }
        )*
    };
}

impl_binary_op! {
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Mod,
}

impl ops::Neg for &Value {
    type Output = EvalResult;

    fn neg(self) -> EvalResult {
        evaluate_unary(self, UnaryOp::Neg)
    }
}
