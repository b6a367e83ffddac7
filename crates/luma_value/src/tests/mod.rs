//! Protocol-level test suites.
//!
//! These exercise the operators through the public entry points, with
//! metatables built by the helpers below.

mod operators_tests;
mod unary_operators_tests;

use crate::{MultiValue, Value};

/// A metatable holding the given `event => handler` entries.
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
pub(crate) fn metatable(entries: &[(&str, Value)]) -> Value {
    Value::table_from_pairs(entries.iter().map(|(k, v)| (*k, v.clone()))).unwrap()
}

/// A fresh table carrying a metatable with the given entries.
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
pub(crate) fn with_meta(entries: &[(&str, Value)]) -> Value {
    Value::table().with_metatable(&metatable(entries)).unwrap()
}

/// A function returning `result` regardless of its arguments.
pub(crate) fn returning(result: impl Into<Value>) -> Value {
    let result = result.into();
    Value::function(move |_| Ok(MultiValue::single(&result)))
}
