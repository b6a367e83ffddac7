//! The universal value handle and its storage.
//!
//! A [`Value`] is a shared handle to one storage instance. Cloning a value
//! clones the handle, so table and function payloads are aliased across
//! clones while the scalar payloads never change after construction.
//!
//! # Lifetime
//!
//! Storage lives as long as its last handle. When that handle is dropped,
//! the storage's `__gc` handler (if its metatable has one) runs before the
//! storage is released; see [`crate::finalize`].

mod numeral;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::errors::{cannot_convert, CallResult, EvalError, EvalResult};
use crate::finalize;
use crate::function::Function;
use crate::kind::Kind;
use crate::multi::MultiValue;
use crate::table::Table;

/// Tagged payload of a storage instance.
///
/// Only `Table` is mutable after construction; the tag itself never changes.
pub enum Variant {
    Nil,
    Boolean(bool),
    Number(f64),
    String(Box<str>),
    Table(Table),
    Function(Function),
}

pub(crate) struct Storage {
    variant: Variant,
    metatable: RefCell<Option<Value>>,
    finalized: Cell<bool>,
}

/// Shared handle to a dynamically typed value.
///
/// Built on `Rc`, so values are confined to the thread that created them.
#[derive(Clone)]
pub struct Value(Rc<Storage>);

impl Value {
    fn from_variant(variant: Variant) -> Self {
        Value(Rc::new(Storage {
            variant,
            metatable: RefCell::new(None),
            finalized: Cell::new(false),
        }))
    }

    // Factory methods

    /// A fresh nil value.
    pub fn nil() -> Self {
        Self::from_variant(Variant::Nil)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Self::from_variant(Variant::Boolean(b))
    }

    #[inline]
    pub fn number(n: f64) -> Self {
        Self::from_variant(Variant::Number(n))
    }

    pub fn string(s: impl Into<Box<str>>) -> Self {
        Self::from_variant(Variant::String(s.into()))
    }

    /// A new, empty table.
    pub fn table() -> Self {
        Self::from_variant(Variant::Table(Table::new()))
    }

    /// A new table holding the given entries.
    ///
    /// Fails on the first nil or NaN key. Pairs with a nil value are skipped.
    pub fn table_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> EvalResult
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let value = Self::table();
        if let Variant::Table(table) = value.variant() {
            for (k, v) in pairs {
                table.set(k.into(), v.into())?;
            }
        }
        Ok(value)
    }

    /// A new table holding `items` under the keys `1..=n`.
    pub fn sequence<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        let value = Self::table();
        if let Variant::Table(table) = value.variant() {
            for (i, item) in items.into_iter().enumerate() {
                if let Ok(key) = crate::table::TableKey::new(Value::from(i + 1)) {
                    table.put(key, item.into());
                }
            }
        }
        value
    }

    /// Wrap a native callable taking and returning positional values.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(MultiValue) -> CallResult + 'static,
    {
        Self::from_variant(Variant::Function(Function::new(f)))
    }

    // Kind probes

    #[inline]
    pub fn variant(&self) -> &Variant {
        &self.0.variant
    }

    pub fn kind(&self) -> Kind {
        match self.variant() {
            Variant::Nil => Kind::Nil,
            Variant::Boolean(_) => Kind::Boolean,
            Variant::Number(_) => Kind::Number,
            Variant::String(_) => Kind::String,
            Variant::Table(_) => Kind::Table,
            Variant::Function(_) => Kind::Function,
        }
    }

    /// Scripting-level type name ("nil", "number", ...).
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self.variant(), Variant::Nil)
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self.variant(), Variant::Boolean(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self.variant(), Variant::Number(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self.variant(), Variant::String(_))
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self.variant(), Variant::Table(_))
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self.variant(), Variant::Function(_))
    }

    // Narrowing

    /// The number payload, without coercion.
    pub fn as_number(&self) -> Option<f64> {
        match self.variant() {
            Variant::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, without coercion.
    pub fn as_str(&self) -> Option<&str> {
        match self.variant() {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self.variant() {
            Variant::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self.variant() {
            Variant::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Numeric coercion: numbers as-is, numeral strings parsed, else `None`.
    pub fn try_number(&self) -> Option<f64> {
        match self.variant() {
            Variant::Number(n) => Some(*n),
            Variant::String(s) => numeral::parse(s),
            _ => None,
        }
    }

    pub fn is_number_convertible(&self) -> bool {
        self.try_number().is_some()
    }

    /// Coerce to a number, failing with a conversion error.
    pub fn to_number(&self) -> Result<f64, EvalError> {
        self.try_number()
            .ok_or_else(|| cannot_convert(self.type_name(), "number"))
    }

    /// Whether [`Value::to_text`] succeeds (strings and numbers).
    pub fn is_text_convertible(&self) -> bool {
        matches!(self.variant(), Variant::String(_) | Variant::Number(_))
    }

    /// Coerce to text: strings as-is, numbers in the default format.
    pub fn to_text(&self) -> Result<String, EvalError> {
        match self.variant() {
            Variant::String(s) => Ok(s.to_string()),
            Variant::Number(n) => Ok(numeral::format(*n)),
            _ => Err(cannot_convert(self.type_name(), "string")),
        }
    }

    /// Truthiness: only nil and `false` are false.
    pub fn to_boolean(&self) -> bool {
        !matches!(self.variant(), Variant::Nil | Variant::Boolean(false))
    }

    #[inline]
    pub fn is_mapping(&self) -> bool {
        self.is_table()
    }

    /// Snapshot of a table's entries in key order.
    pub fn to_mapping(&self) -> Result<Vec<(Value, Value)>, EvalError> {
        self.as_table()
            .map(Table::entries)
            .ok_or_else(|| cannot_convert(self.type_name(), "table"))
    }

    /// Whether the storage itself is a function.
    ///
    /// Values that are callable only through `__call` report `false`; use
    /// [`Value::call`] to invoke either.
    #[inline]
    pub fn is_callable(&self) -> bool {
        self.is_function()
    }

    pub fn to_callable(&self) -> Result<Function, EvalError> {
        self.as_function()
            .cloned()
            .ok_or_else(|| cannot_convert(self.type_name(), "function"))
    }

    /// Render any value as text. Never fails.
    pub fn explicit_to_text(&self) -> String {
        match self.variant() {
            Variant::Nil => "nil".to_string(),
            Variant::Boolean(b) => b.to_string(),
            Variant::Number(n) => numeral::format(*n),
            Variant::String(s) => s.to_string(),
            Variant::Table(_) | Variant::Function(_) => {
                format!("{}: {:#x}", self.type_name(), self.identity())
            }
        }
    }

    // Identity and raw equality

    /// Whether both handles point at the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Storage address, used for ordering reference kinds and for display.
    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Equality without metamethods.
    ///
    /// Scalars compare by content, tables and functions by identity, and
    /// values of different kinds are never equal.
    pub fn raw_equal(&self, other: &Value) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.variant(), other.variant()) {
            (Variant::Nil, Variant::Nil) => true,
            (Variant::Boolean(a), Variant::Boolean(b)) => a == b,
            (Variant::Number(a), Variant::Number(b)) => a == b,
            (Variant::String(a), Variant::String(b)) => a == b,
            _ => false,
        }
    }

    // Logical helpers

    /// `self and other`: `self` when falsy, else `other`.
    pub fn logical_and(&self, other: &Value) -> Value {
        if self.to_boolean() {
            other.clone()
        } else {
            self.clone()
        }
    }

    /// `self or other`: `self` when truthy, else `other`.
    pub fn logical_or(&self, other: &Value) -> Value {
        if self.to_boolean() {
            self.clone()
        } else {
            other.clone()
        }
    }

    pub fn logical_not(&self) -> Value {
        Value::boolean(!self.to_boolean())
    }

    // Storage internals

    pub(crate) fn metatable_slot(&self) -> &RefCell<Option<Value>> {
        &self.0.metatable
    }

    pub(crate) fn finalized_flag(&self) -> &Cell<bool> {
        &self.0.finalized
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        if Rc::strong_count(&self.0) == 1 && !self.0.finalized.get() {
            finalize::on_last_release(self);
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::nil()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.raw_equal(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.explicit_to_text())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant() {
            Variant::String(s) => write!(f, "{s:?}"),
            _ => f.write_str(&self.explicit_to_text()),
        }
    }
}

// Native conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

/// Single-value coercion: the first value, or nil when empty.
impl From<MultiValue> for Value {
    fn from(values: MultiValue) -> Self {
        values.into_first()
    }
}
