//! Unary operator implementations.
//!
//! Same shape as the binary operators: native rule, then the operand's
//! handler, then a typed failure.

use crate::errors::{arithmetic_on, bitwise_on, cannot_get_length, EvalError, EvalResult};
use crate::metatable::{call_handler, MetaEvent};
use crate::multi::MultiValue;
use crate::operators::to_integer;
use crate::value::{Value, Variant};

/// Unary operators of the protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation (`__unm`).
    Neg,
    /// Logical not; never consults a handler.
    Not,
    /// Length (`__len`).
    Len,
    /// Bitwise complement (`__bnot`).
    BitNot,
}

/// Evaluate a unary operation.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => match value.try_number() {
            Some(n) => Ok(Value::number(-n)),
            None => dispatch(value, MetaEvent::Unm, || arithmetic_on(value.type_name())),
        },
        UnaryOp::Not => Ok(value.logical_not()),
        UnaryOp::Len => match native_length(value) {
            Some(n) => Ok(Value::number(n)),
            None => dispatch(value, MetaEvent::Len, || cannot_get_length(value.type_name())),
        },
        UnaryOp::BitNot => match value.try_number() {
            Some(n) => Ok(Value::number(!to_integer(n)? as f64)),
            None => dispatch(value, MetaEvent::BNot, || bitwise_on(value.type_name())),
        },
    }
}

/// Unary handlers receive the operand as their only argument.
fn dispatch(value: &Value, event: MetaEvent, error: impl FnOnce() -> EvalError) -> EvalResult {
    match value.meta_handler(event) {
        Some(handler) => call_handler(&handler, event, MultiValue::single(value)),
        None => Err(error()),
    }
}

/// Character count of a string, border of a table.
fn native_length(value: &Value) -> Option<f64> {
    match value.variant() {
        Variant::String(s) => Some(s.chars().count() as f64),
        Variant::Table(t) => Some(t.border()),
        _ => None,
    }
}

impl Value {
    /// Protocol length (`#value`).
    pub fn length(&self) -> EvalResult {
        evaluate_unary(self, UnaryOp::Len)
    }

    /// Protocol negation (`-value`).
    pub fn negate(&self) -> EvalResult {
        evaluate_unary(self, UnaryOp::Neg)
    }

    /// Length without consulting `__len`.
    pub fn raw_len(&self) -> Result<f64, EvalError> {
        native_length(self).ok_or_else(|| cannot_get_length(self.type_name()))
    }
}
