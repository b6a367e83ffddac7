//! Last-release finalization.
//!
//! When the last handle to a storage is dropped, its `__gc` handler runs
//! once with the value as its only argument. Failures are logged and
//! suppressed. Reference cycles never reach a last release and are never
//! finalized.

use crate::metatable::MetaEvent;
use crate::multi::MultiValue;
use crate::value::Value;

/// Called from `Drop for Value` when `value` is the last handle.
pub(crate) fn on_last_release(value: &Value) {
    if value.metatable_slot().borrow().is_none() {
        return;
    }
    let Some(handler) = value.meta_handler(MetaEvent::Gc) else {
        return;
    };
    value.finalized_flag().set(true);
    tracing::debug!(kind = value.type_name(), "running finalizer");
    if let Err(err) = handler.call(MultiValue::single(value)) {
        tracing::warn!(error = %err, "finalizer failed; error suppressed");
    }
}

impl Value {
    /// Whether this storage's finalizer has already run.
    ///
    /// Only observable on storage resurrected by its own finalizer.
    pub fn is_finalized(&self) -> bool {
        self.finalized_flag().get()
    }
}
