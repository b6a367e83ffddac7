//! Luma Stdlib - an explicitly constructed standard environment for luma values.
//!
//! # Architecture
//!
//! - `Environment`: a globals table plus the library tables opened into it,
//!   configured through `EnvironmentBuilder`
//! - `Libraries`: which of the base, math and io libraries to open
//! - `native`: adapters turning typed Rust closures into function values
//! - Print sinks: where `print` and `io.write` send their text
//! - `init_tracing`: opt-in diagnostics through `RUST_LOG`
//!
//! There is no global state; every environment is independent.

mod base;
mod environment;
mod io;
mod math;
pub mod native;
mod print_handler;
mod tracing_setup;

pub use environment::{Environment, EnvironmentBuilder, Libraries};
pub use native::{argument, native, FromValue, IntoResults, NativeFunction};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use tracing_setup::init_tracing;
