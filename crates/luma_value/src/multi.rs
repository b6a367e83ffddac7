//! Positional multi-value lists for call arguments and results.
//!
//! [`MultiValue`] is an ordered sequence with 1-based, never-failing reads.
//! [`MultiValueRef`] holds mutable references to existing values and is the
//! target side of a simultaneous assignment (`a, b = b, a`).

use std::fmt;

use smallvec::SmallVec;

use crate::value::Value;

/// Ordered sequence of values used for arguments and results.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiValue {
    values: SmallVec<[Value; 4]>,
}

impl MultiValue {
    /// An empty list.
    pub fn new() -> Self {
        MultiValue {
            values: SmallVec::new(),
        }
    }

    /// A one-element list.
    pub fn single(value: impl Into<Value>) -> Self {
        MultiValue::new().with(value)
    }

    /// Append and return `self`, for chained construction.
    #[must_use]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Insert at the front, shifting the other values one position right.
    pub fn prepend(&mut self, value: impl Into<Value>) {
        self.values.insert(0, value.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at 1-based position `index`, or nil when out of range.
    pub fn get(&self, index: usize) -> Value {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// Single-value coercion: the first value, or nil when empty.
    pub fn first(&self) -> Value {
        self.get(1)
    }

    pub fn into_first(self) -> Value {
        self.values.into_iter().next().unwrap_or_default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values.into_vec()
    }
}

impl From<Value> for MultiValue {
    fn from(value: Value) -> Self {
        MultiValue::single(value)
    }
}

impl From<Vec<Value>> for MultiValue {
    fn from(values: Vec<Value>) -> Self {
        MultiValue {
            values: SmallVec::from_vec(values),
        }
    }
}

impl FromIterator<Value> for MultiValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        MultiValue {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<Value> for MultiValue {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl IntoIterator for MultiValue {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Tab-separated explicit text of every value.
impl fmt::Display for MultiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            f.write_str(&value.explicit_to_text())?;
        }
        Ok(())
    }
}

/// Build a [`MultiValue`] from expressions convertible into values.
///
/// ```
/// use luma_value::{multi, Value};
///
/// let args = multi![1, "two", true];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.get(2), Value::from("two"));
/// ```
#[macro_export]
macro_rules! multi {
    () => {
        $crate::MultiValue::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = $crate::MultiValue::new();
        $(values.push($value);)+
        values
    }};
}

/// Mutable references to existing values, assignable positionally.
///
/// Reads go through [`MultiValueRef::get`] and [`MultiValueRef::snapshot`];
/// writes through the `assign*` and [`MultiValueRef::swizzle`] methods.
#[derive(Default)]
pub struct MultiValueRef<'a> {
    slots: SmallVec<[&'a mut Value; 4]>,
}

impl<'a> MultiValueRef<'a> {
    pub fn new() -> Self {
        MultiValueRef {
            slots: SmallVec::new(),
        }
    }

    /// Add a destination slot.
    #[must_use]
    pub fn with(mut self, slot: &'a mut Value) -> Self {
        self.slots.push(slot);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current value of 1-based slot `index`, or nil when out of range.
    pub fn get(&self, index: usize) -> Value {
        index
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .map(|slot| (**slot).clone())
            .unwrap_or_default()
    }

    /// Copy the current slot values into a plain list.
    pub fn snapshot(&self) -> MultiValue {
        self.slots.iter().map(|slot| (**slot).clone()).collect()
    }

    /// Write `values` into the slots position by position.
    ///
    /// Extra slots or extra values are left alone.
    pub fn assign(&mut self, values: &MultiValue) {
        for (slot, value) in self.slots.iter_mut().zip(values.iter()) {
            **slot = value.clone();
        }
    }

    /// Assign from another reference list, reading all sources first.
    pub fn assign_refs(&mut self, source: &MultiValueRef<'_>) {
        let values = source.snapshot();
        self.assign(&values);
    }

    /// Permute the slots in place: slot `i` receives the old value of slot
    /// `order[i]` (1-based). Out-of-range positions assign nil.
    ///
    /// `swizzle(&[2, 1])` swaps a two-slot list.
    pub fn swizzle(&mut self, order: &[usize]) {
        let values = self.snapshot();
        for (slot, &position) in self.slots.iter_mut().zip(order) {
            **slot = values.get(position);
        }
    }
}

impl fmt::Debug for MultiValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| &**slot))
            .finish()
    }
}
