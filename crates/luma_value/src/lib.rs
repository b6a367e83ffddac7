#![allow(
    clippy::result_large_err,
    reason = "EvalError is fundamental; boxing would add complexity across the crate"
)]
//! Luma Value - a host-embeddable dynamic value model.
//!
//! This crate provides one universal [`Value`] type holding nil, a boolean,
//! a number, a string, a table or a function, plus the operator protocol
//! that gives those values scripting-language behavior without a parser or
//! a bytecode VM.
//!
//! # Architecture
//!
//! - `Value`: shared `Rc` handle; tables and functions alias across clones
//! - `Table`: mutable key/value storage with a total key order
//! - Metatables: per-value tables whose `__event` keys intercept operators
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based dispatch,
//!   falling back to metatable handlers, then to a typed `EvalError`
//! - `MultiValue`: positional argument and result lists
//! - Finalization: `__gc` runs once when the last handle is dropped
//!
//! Values are `!Send`; the whole model is single-threaded.
//!
//! ```
//! use luma_value::{multi, Value};
//!
//! let t = Value::table();
//! t.set_index("foo", 21).unwrap();
//! let doubled = (&t.index("foo").unwrap() * &Value::from(2)).unwrap();
//! assert_eq!(doubled, Value::from(42));
//!
//! let first = Value::function(|args| Ok(multi![args.get(2)]));
//! assert_eq!(first.call_first(multi![1, 2]).unwrap(), Value::from(2));
//! ```

mod call;
pub mod errors;
mod finalize;
mod function;
mod index;
mod kind;
mod metatable;
mod multi;
mod operators;
mod table;
mod unary_operators;
mod value;

pub use errors::{
    bad_argument, cannot_convert, CallResult, ErrorCategory, EvalError, EvalErrorKind, EvalResult,
};
pub use function::{Function, NativeFn};
pub use kind::Kind;
pub use metatable::MetaEvent;
pub use multi::{MultiValue, MultiValueRef};
pub use operators::{evaluate_binary, BinaryOp};
pub use table::Table;
pub use unary_operators::{evaluate_unary, UnaryOp};
pub use value::{Value, Variant};

#[cfg(test)]
mod tests;
