//! Indexing protocol (`value[key]`, `value[key] = v`) and raw table access.

use crate::errors::{cannot_index, nil_index, EvalError, EvalResult};
use crate::metatable::{call_handler, MetaEvent};
use crate::multi;
use crate::value::Value;

impl Value {
    /// Protocol read of `self[key]`.
    ///
    /// A present table entry wins. Otherwise `__index` is called with
    /// `(self, key)` when it is a function, or indexed in turn when it is
    /// anything else. Tables without a handler read as nil.
    pub fn index(&self, key: impl Into<Value>) -> EvalResult {
        let key = key.into();
        if let Some(found) = self.as_table().and_then(|table| table.get(&key)) {
            return Ok(found);
        }
        match self.meta_handler(MetaEvent::Index) {
            Some(handler) if handler.is_function() => {
                call_handler(&handler, MetaEvent::Index, multi![self, key])
            }
            Some(handler) => handler.index(key),
            None if self.is_table() => Ok(Value::nil()),
            None => Err(cannot_index(self.type_name())),
        }
    }

    /// Protocol write of `self[key] = value`.
    ///
    /// An existing table entry is overwritten in place. Otherwise
    /// `__newindex` is called with `(self, key, value)` when it is a
    /// function (its results are discarded), or receives the write in turn
    /// when it is anything else. Tables without a handler get a new entry.
    pub fn set_index(
        &self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<(), EvalError> {
        let key = key.into();
        let value = value.into();
        if key.is_nil() {
            return Err(nil_index());
        }
        if let Some(table) = self.as_table() {
            if table.contains(&key) {
                return table.set(key, value);
            }
        }
        match self.meta_handler(MetaEvent::NewIndex) {
            Some(handler) if handler.is_function() => {
                tracing::trace!(event = MetaEvent::NewIndex.name(), "metamethod dispatch");
                handler.call(multi![self, key, value])?;
                Ok(())
            }
            Some(handler) => handler.set_index(key, value),
            None => match self.as_table() {
                Some(table) => table.set(key, value),
                None => Err(cannot_index(self.type_name())),
            },
        }
    }

    // Raw access

    /// Read a table entry without metamethods; absent keys read as nil.
    pub fn raw_get(&self, key: impl Into<Value>) -> EvalResult {
        let key = key.into();
        self.as_table()
            .map(|table| table.get(&key).unwrap_or_default())
            .ok_or_else(|| cannot_index(self.type_name()))
    }

    /// Write a table entry without metamethods. Writing nil removes it.
    pub fn raw_set(
        &self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<(), EvalError> {
        match self.as_table() {
            Some(table) => table.set(key.into(), value.into()),
            None => Err(cannot_index(self.type_name())),
        }
    }

    /// The table entry after `key` in key order; nil starts the walk.
    pub fn next(&self, key: &Value) -> Result<Option<(Value, Value)>, EvalError> {
        match self.as_table() {
            Some(table) => table.next(key),
            None => Err(cannot_index(self.type_name())),
        }
    }
}
