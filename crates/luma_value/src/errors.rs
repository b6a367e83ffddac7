//! Error types for the operator protocol.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the structured data of a failure, and
//! `ErrorCategory` folds the kinds into the protocol's taxonomy
//! (conversion, arithmetic, concatenation, ordering, indexing, call,
//! table-key violation) plus `Host` for failures raised by host functions.
//!
//! Factory functions (e.g. `arithmetic_on("nil")`) are the public way to
//! build errors; they populate both `kind` and `message`.

use crate::multi::MultiValue;
use crate::value::Value;

/// Result of an operation producing a single value.
pub type EvalResult = Result<Value, EvalError>;

/// Result of a call: the callee's positional results.
pub type CallResult = Result<MultiValue, EvalError>;

/// Coarse classification of an error kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Conversion,
    Arithmetic,
    Concatenation,
    Ordering,
    Indexing,
    Call,
    TableKey,
    /// Raised by a host function rather than by the protocol itself.
    Host,
}

/// Typed error category for structured diagnostics.
///
/// The `Display` output is the scripting-style message: it names the kind
/// of the offending value and the attempted operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Conversion
    #[error("cannot convert a {type_name} value to {target}")]
    Conversion {
        type_name: &'static str,
        target: &'static str,
    },

    // Arithmetic
    #[error("attempt to perform arithmetic on a {type_name} value")]
    Arithmetic { type_name: &'static str },
    #[error("attempt to perform bitwise operation on a {type_name} value")]
    Bitwise { type_name: &'static str },
    #[error("number has no integer representation")]
    NoIntegerRepresentation,

    // Concatenation
    #[error("attempt to concatenate a {type_name} value")]
    Concatenation { type_name: &'static str },

    // Ordering
    #[error("attempt to compare {left} with {right}")]
    Ordering {
        left: &'static str,
        right: &'static str,
    },

    // Indexing
    #[error("attempt to get length of a {type_name} value")]
    Length { type_name: &'static str },
    #[error("attempt to index a {type_name} value")]
    Index { type_name: &'static str },
    #[error("table index is nil")]
    NilIndex,

    // Table keys
    #[error("table index is {reason}")]
    InvalidKey { reason: &'static str },

    // Call
    #[error("attempt to call a {type_name} value")]
    NotCallable { type_name: &'static str },

    // Host
    #[error("bad argument #{position} to '{function}' ({message})")]
    BadArgument {
        position: usize,
        function: String,
        message: String,
    },
    /// Free-form failure raised by host code.
    #[error("{message}")]
    Custom { message: String },
}

impl EvalErrorKind {
    /// The taxonomy bucket this kind belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Conversion { .. } => ErrorCategory::Conversion,
            Self::Arithmetic { .. } | Self::Bitwise { .. } | Self::NoIntegerRepresentation => {
                ErrorCategory::Arithmetic
            }
            Self::Concatenation { .. } => ErrorCategory::Concatenation,
            Self::Ordering { .. } => ErrorCategory::Ordering,
            Self::Length { .. } | Self::Index { .. } | Self::NilIndex => ErrorCategory::Indexing,
            Self::InvalidKey { .. } => ErrorCategory::TableKey,
            Self::NotCallable { .. } => ErrorCategory::Call,
            Self::BadArgument { .. } | Self::Custom { .. } => ErrorCategory::Host,
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create a host error with just a message.
    ///
    /// Uses the `Custom` kind. Prefer the factory functions when the
    /// failure belongs to the protocol's own taxonomy.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// Shorthand for `self.kind.category()`.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

// Conversion Errors

/// Forced conversion of a value to an unsupported target.
#[cold]
pub fn cannot_convert(type_name: &'static str, target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Conversion { type_name, target })
}

// Arithmetic Errors

/// Arithmetic on a non-numeric operand with no handler.
#[cold]
pub fn arithmetic_on(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arithmetic { type_name })
}

/// Bitwise operation on a non-numeric operand with no handler.
#[cold]
pub fn bitwise_on(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Bitwise { type_name })
}

/// Bitwise operation on a number that is not integral.
#[cold]
pub fn no_integer_representation() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoIntegerRepresentation)
}

// Concatenation Errors

/// Concatenation of an operand that is neither a string nor a number.
#[cold]
pub fn concatenate(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Concatenation { type_name })
}

// Ordering Errors

/// Ordering comparison with no native rule and no handler.
#[cold]
pub fn compare(left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Ordering { left, right })
}

// Indexing Errors

/// Length of a value that has none.
#[cold]
pub fn cannot_get_length(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Length { type_name })
}

/// Indexing a non-indexable value.
#[cold]
pub fn cannot_index(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Index { type_name })
}

/// Writing a table entry under a nil key.
#[cold]
pub fn nil_index() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NilIndex)
}

/// Writing a table entry under a key that can never be looked up again.
#[cold]
pub fn invalid_key(reason: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidKey { reason })
}

// Call Errors

/// Calling a value that is neither a function nor has `__call`.
#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

// Host Errors

/// Argument validation failure inside a host function.
#[cold]
pub fn bad_argument(position: usize, function: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadArgument {
        position,
        function: function.to_string(),
        message: message.into(),
    })
}
