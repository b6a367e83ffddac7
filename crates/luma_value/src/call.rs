//! Call protocol.

use crate::errors::{not_callable, CallResult, EvalResult};
use crate::metatable::MetaEvent;
use crate::multi::MultiValue;
use crate::value::{Value, Variant};

impl Value {
    /// Call `self` with positional arguments.
    ///
    /// Functions are invoked directly. Any other value is called through
    /// its `__call` handler with itself prepended to the arguments.
    #[tracing::instrument(level = "trace", skip_all, fields(callee = self.type_name()))]
    pub fn call(&self, args: impl Into<MultiValue>) -> CallResult {
        let mut args = args.into();
        if let Variant::Function(function) = self.variant() {
            return function.invoke(args);
        }
        match self.meta_handler(MetaEvent::Call) {
            Some(handler) => {
                tracing::trace!(event = MetaEvent::Call.name(), "metamethod dispatch");
                args.prepend(self);
                handler.call(args)
            }
            None => Err(not_callable(self.type_name())),
        }
    }

    /// Call and keep only the first result (nil when there is none).
    pub fn call_first(&self, args: impl Into<MultiValue>) -> EvalResult {
        Ok(self.call(args)?.into_first())
    }
}
