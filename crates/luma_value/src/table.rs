//! Table storage: a mutable mapping from keys to values.
//!
//! Keys are kept in a `BTreeMap` under a total order: first by kind rank,
//! then by a kind-specific comparison (numeric order, byte order for
//! strings, storage identity for tables and functions).

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{invalid_key, nil_index, EvalError};
use crate::value::{Value, Variant};

/// A value used as a table key.
///
/// Construction goes through [`TableKey::new`], which rejects the keys a
/// table can never store (nil and NaN).
#[derive(Clone)]
pub(crate) struct TableKey(Value);

impl TableKey {
    pub(crate) fn new(key: Value) -> Result<Self, EvalError> {
        match key.variant() {
            Variant::Nil => Err(nil_index()),
            Variant::Number(n) if n.is_nan() => Err(invalid_key("NaN")),
            _ => Ok(TableKey(key)),
        }
    }

    /// Wrap a key for lookup only; lookups never fail.
    fn probe(key: &Value) -> Self {
        TableKey(key.clone())
    }

    pub(crate) fn value(&self) -> &Value {
        &self.0
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    // `-0.0` and `0.0` are the same key; NaN only ever appears in probes.
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

impl Ord for TableKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        a.kind().cmp(&b.kind()).then_with(|| match (a.variant(), b.variant()) {
            (Variant::Boolean(x), Variant::Boolean(y)) => x.cmp(y),
            (Variant::Number(x), Variant::Number(y)) => compare_numbers(*x, *y),
            (Variant::String(x), Variant::String(y)) => x.cmp(y),
            (Variant::Nil, Variant::Nil) => Ordering::Equal,
            // Same reference kind: order by storage address.
            _ => a.identity().cmp(&b.identity()),
        })
    }
}

impl PartialOrd for TableKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TableKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TableKey {}

/// Mutable mapping behind a table value.
///
/// Every mutation releases the internal borrow before dropping the value it
/// displaced, so finalizers triggered by a removal may touch this table.
pub struct Table {
    entries: RefCell<BTreeMap<TableKey, Value>>,
}

impl Table {
    pub(crate) fn new() -> Self {
        Table {
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    /// Look up a key without consulting any metatable.
    pub fn get(&self, key: &Value) -> Option<Value> {
        if key.is_nil() {
            return None;
        }
        self.entries.borrow().get(&TableKey::probe(key)).cloned()
    }

    /// Whether the key currently holds a (non-nil) value.
    pub fn contains(&self, key: &Value) -> bool {
        !key.is_nil() && self.entries.borrow().contains_key(&TableKey::probe(key))
    }

    /// Store a value under a key. Storing nil removes the entry.
    pub fn set(&self, key: Value, value: Value) -> Result<(), EvalError> {
        let key = TableKey::new(key)?;
        self.put(key, value);
        Ok(())
    }

    pub(crate) fn put(&self, key: TableKey, value: Value) {
        let mut entries = self.entries.borrow_mut();
        let displaced = entries.remove_entry(&key);
        if !value.is_nil() {
            entries.insert(key, value);
        }
        drop(entries);
        drop(displaced);
    }

    /// Number of stored entries.
    pub fn count(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// The length "border": the greatest whole-number key, or 0.
    ///
    /// This does not check that the keys below the border are present, so a
    /// sparse table reports its largest integer key.
    pub fn border(&self) -> f64 {
        self.entries
            .borrow()
            .keys()
            .rev()
            .find_map(|key| match key.value().variant() {
                Variant::Number(n) if n.fract() == 0.0 => Some(*n),
                _ => None,
            })
            .map_or(0.0, |n| n.max(0.0))
    }

    /// Snapshot of all entries in key order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.value().clone(), v.clone()))
            .collect()
    }

    /// The entry following `key` in key order; nil starts the traversal.
    ///
    /// Returns `Ok(None)` past the last entry, and fails when `key` is not
    /// present in the table.
    pub fn next(&self, key: &Value) -> Result<Option<(Value, Value)>, EvalError> {
        use std::ops::Bound::{Excluded, Unbounded};

        let entries = self.entries.borrow();
        if key.is_nil() {
            return Ok(entries
                .iter()
                .next()
                .map(|(k, v)| (k.value().clone(), v.clone())));
        }
        let probe = TableKey::probe(key);
        if !entries.contains_key(&probe) {
            return Err(EvalError::new("invalid key to 'next'"));
        }
        Ok(entries
            .range((Excluded(probe), Unbounded))
            .next()
            .map(|(k, v)| (k.value().clone(), v.clone())))
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table({} entries)", self.count())
    }
}
