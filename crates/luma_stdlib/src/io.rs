//! The `io` library table.
//!
//! Only `write` is provided; it shares the environment's print sink.

use luma_value::{MultiValue, Value};

use crate::print_handler::SharedPrintHandler;

pub(crate) const NAME: &str = "io";

pub(crate) fn library(print_handler: &SharedPrintHandler) -> Vec<(&'static str, Value)> {
    vec![("write", write(print_handler))]
}

/// `write(...)` prints each argument's text with no separator or newline.
fn write(print_handler: &SharedPrintHandler) -> Value {
    let sink = SharedPrintHandler::clone(print_handler);
    Value::function(move |args: MultiValue| {
        for value in &args {
            sink.print(&value.explicit_to_text());
        }
        Ok(MultiValue::new())
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
