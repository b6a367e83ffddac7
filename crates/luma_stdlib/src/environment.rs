//! Explicitly constructed host environments.
//!
//! An [`Environment`] owns a globals table and the library tables opened
//! into it. Nothing is process-wide: two environments never share state,
//! so hosts and tests can build as many as they like.
//!
//! ```
//! use luma_stdlib::{buffer_handler, Environment, Libraries};
//! use luma_value::multi;
//!
//! let env = Environment::builder()
//!     .libraries(Libraries::BASE | Libraries::IO)
//!     .print_handler(buffer_handler())
//!     .build()
//!     .unwrap();
//! env.call("print", multi!["answer", 42]).unwrap();
//! assert_eq!(env.output(), "answer\t42\n");
//! assert!(env.library("math").is_none());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use luma_value::{CallResult, EvalError, EvalResult, MultiValue, Value};

use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::{base, io, math};

bitflags! {
    /// Libraries to open when building an environment.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Libraries: u8 {
        /// Global functions: `print`, `type`, `pcall`, ...
        const BASE = 1 << 0;
        /// The `math` table.
        const MATH = 1 << 1;
        /// The `io` table.
        const IO = 1 << 2;

        const ALL = Self::BASE.bits() | Self::MATH.bits() | Self::IO.bits();
    }
}

impl Default for Libraries {
    fn default() -> Self {
        Libraries::ALL
    }
}

/// Random generator shared by `math.random` and `math.randomseed`.
pub(crate) type SharedRng = Rc<RefCell<StdRng>>;

/// Builder for [`Environment`].
///
/// Defaults: every library, stdout printing, an entropy-seeded generator.
#[derive(Default)]
pub struct EnvironmentBuilder {
    libraries: Libraries,
    print_handler: Option<SharedPrintHandler>,
    random_seed: Option<u64>,
}

impl EnvironmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn libraries(mut self, libraries: Libraries) -> Self {
        self.libraries = libraries;
        self
    }

    /// Sink for `print` and `io.write`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Seed `math.random` for reproducible sequences.
    #[must_use]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Populate the globals table and the library registry.
    pub fn build(self) -> Result<Environment, EvalError> {
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);
        let globals = Value::table();
        let mut libraries = FxHashMap::default();

        if self.libraries.contains(Libraries::BASE) {
            for (name, function) in base::library(&print_handler) {
                globals.raw_set(name, function)?;
            }
        }
        if self.libraries.contains(Libraries::MATH) {
            let rng = match self.random_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let table = Value::table_from_pairs(math::library(Rc::new(RefCell::new(rng))))?;
            libraries.insert(math::NAME, table);
        }
        if self.libraries.contains(Libraries::IO) {
            let table = Value::table_from_pairs(io::library(&print_handler))?;
            libraries.insert(io::NAME, table);
        }

        for (name, table) in &libraries {
            globals.raw_set(*name, table)?;
        }
        tracing::debug!(
            libraries = ?self.libraries,
            globals = globals.as_table().map_or(0, luma_value::Table::count),
            "environment built"
        );

        Ok(Environment {
            globals,
            libraries,
            print_handler,
        })
    }
}

/// A globals table plus the libraries opened into it.
pub struct Environment {
    globals: Value,
    libraries: FxHashMap<&'static str, Value>,
    print_handler: SharedPrintHandler,
}

impl Environment {
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::new()
    }

    /// Every library, printing to stdout.
    pub fn new() -> Result<Self, EvalError> {
        Self::builder().build()
    }

    /// The globals table.
    pub fn globals(&self) -> &Value {
        &self.globals
    }

    /// Read a global through the indexing protocol.
    pub fn get(&self, name: &str) -> EvalResult {
        self.globals.index(name)
    }

    /// Assign a global through the indexing protocol.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), EvalError> {
        self.globals.set_index(name, value)
    }

    /// Call the global `name` with `args`.
    pub fn call(&self, name: &str, args: impl Into<MultiValue>) -> CallResult {
        self.get(name)?.call(args)
    }

    /// A table-valued library opened at build time (`"math"`, `"io"`).
    ///
    /// Unaffected by later reassignment of the global of the same name.
    pub fn library(&self, name: &str) -> Option<&Value> {
        self.libraries.get(name)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Text captured by a buffer print sink; empty for other sinks.
    pub fn output(&self) -> String {
        self.print_handler.get_output()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut libraries: Vec<_> = self.libraries.keys().collect();
        libraries.sort_unstable();
        f.debug_struct("Environment")
            .field("globals", &self.globals)
            .field("libraries", &libraries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
