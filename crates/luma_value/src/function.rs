//! Native function payload.
//!
//! Every function has one normalized signature: positional values in,
//! positional values out. Adapting typed Rust closures to that shape is left
//! to host-side adapter layers.

use std::fmt;
use std::rc::Rc;

use crate::errors::CallResult;
use crate::multi::MultiValue;

/// The normalized callable signature.
pub type NativeFn = dyn Fn(MultiValue) -> CallResult;

/// Shared handle to a native callable.
#[derive(Clone)]
pub struct Function(Rc<NativeFn>);

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(MultiValue) -> CallResult + 'static,
    {
        Function(Rc::new(f))
    }

    /// Invoke the callable directly, bypassing the call protocol.
    #[inline]
    pub fn invoke(&self, args: MultiValue) -> CallResult {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}
