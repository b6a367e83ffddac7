//! Print sink for `print` and `io.write`.
//!
//! Output goes to one of three destinations:
//! - Stdout (default)
//! - Buffer, for hosts and tests that capture output
//! - Silent, discarding everything
//!
//! Dispatch is a plain enum match; the set of sinks is closed.

use std::cell::RefCell;
use std::rc::Rc;

/// Writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    pub fn print(&self, msg: &str) {
        print!("{msg}");
    }
}

/// Captures output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: RefCell<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: RefCell::new(String::new()),
        }
    }

    /// Append `msg` and a newline.
    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.borrow_mut();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Append `msg` as is.
    pub fn print(&self, msg: &str) {
        self.buffer.borrow_mut().push_str(msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

/// Print sink selected when the environment is built.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for sinks that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print sink shared between the environment and its library functions.
pub type SharedPrintHandler = Rc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Rc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Rc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Rc::new(PrintHandlerImpl::Silent)
}
