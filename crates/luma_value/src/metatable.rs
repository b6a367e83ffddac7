//! Metatable attachment and operator-event resolution.
//!
//! A metatable is an ordinary table; the protocol reads its event keys
//! (`"__add"`, `"__index"`, ...) with raw lookups, never through the
//! metatable's own metamethods.

use std::fmt;

use crate::errors::{cannot_convert, EvalError, EvalResult};
use crate::multi::MultiValue;
use crate::value::Value;

/// Operator events a metatable can intercept.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetaEvent {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Unm,
    Concat,
    Len,
    Eq,
    Lt,
    Le,
    Index,
    NewIndex,
    Call,
    Gc,
    BAnd,
    BOr,
    BXor,
    Shl,
    Shr,
    BNot,
}

impl MetaEvent {
    /// The metatable key naming this event.
    pub const fn name(self) -> &'static str {
        match self {
            MetaEvent::Add => "__add",
            MetaEvent::Sub => "__sub",
            MetaEvent::Mul => "__mul",
            MetaEvent::Div => "__div",
            MetaEvent::Mod => "__mod",
            MetaEvent::Pow => "__pow",
            MetaEvent::Unm => "__unm",
            MetaEvent::Concat => "__concat",
            MetaEvent::Len => "__len",
            MetaEvent::Eq => "__eq",
            MetaEvent::Lt => "__lt",
            MetaEvent::Le => "__le",
            MetaEvent::Index => "__index",
            MetaEvent::NewIndex => "__newindex",
            MetaEvent::Call => "__call",
            MetaEvent::Gc => "__gc",
            MetaEvent::BAnd => "__band",
            MetaEvent::BOr => "__bor",
            MetaEvent::BXor => "__bxor",
            MetaEvent::Shl => "__shl",
            MetaEvent::Shr => "__shr",
            MetaEvent::BNot => "__bnot",
        }
    }
}

impl fmt::Display for MetaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// The attached metatable, if any.
    pub fn metatable(&self) -> Option<Value> {
        self.metatable_slot().borrow().clone()
    }

    /// Attach a metatable, or detach it when `metatable` is nil.
    ///
    /// Only tables are accepted as metatables.
    pub fn set_metatable(&self, metatable: &Value) -> Result<(), EvalError> {
        let replacement = if metatable.is_nil() {
            None
        } else if metatable.is_table() {
            Some(metatable.clone())
        } else {
            return Err(cannot_convert(metatable.type_name(), "metatable"));
        };
        // The previous metatable is dropped after the borrow is released.
        let previous = self.metatable_slot().replace(replacement);
        drop(previous);
        Ok(())
    }

    /// Builder form of [`Value::set_metatable`].
    pub fn with_metatable(self, metatable: &Value) -> EvalResult {
        self.set_metatable(metatable)?;
        Ok(self)
    }

    /// The handler registered for `event`, if the metatable has one.
    pub fn meta_handler(&self, event: MetaEvent) -> Option<Value> {
        let metatable = self.metatable()?;
        let handler = metatable.as_table()?.get(&Value::string(event.name()))?;
        Some(handler)
    }
}

/// Resolve a handler for a binary event: the left operand wins, then the right.
pub(crate) fn binary_handler(left: &Value, right: &Value, event: MetaEvent) -> Option<Value> {
    left.meta_handler(event)
        .or_else(|| right.meta_handler(event))
}

/// Resolve a handler for a comparison event.
///
/// Both operands must be of the same kind and resolve the same handler;
/// otherwise there is no handler.
pub(crate) fn compare_handler(left: &Value, right: &Value, event: MetaEvent) -> Option<Value> {
    if left.kind() != right.kind() {
        return None;
    }
    let handler = left.meta_handler(event)?;
    let other = right.meta_handler(event)?;
    handler.raw_equal(&other).then_some(handler)
}

/// Invoke a handler and keep its first result.
pub(crate) fn call_handler(handler: &Value, event: MetaEvent, args: MultiValue) -> EvalResult {
    tracing::trace!(event = event.name(), handler = handler.type_name(), "metamethod dispatch");
    Ok(handler.call(args)?.into_first())
}
