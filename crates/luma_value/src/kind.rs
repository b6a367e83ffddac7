//! The closed set of value kinds.

use std::fmt;

/// Kind tag of a value's storage.
///
/// The declaration order is the table-key rank: keys of a lower kind sort
/// before keys of a higher kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Nil,
    Boolean,
    Number,
    String,
    Table,
    Function,
}

impl Kind {
    /// Scripting-level type name, as reported by `type()` and in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Table => "table",
            Kind::Function => "function",
        }
    }

    /// Kinds whose storage is compared by identity rather than by content.
    pub const fn is_reference(self) -> bool {
        matches!(self, Kind::Table | Kind::Function)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
