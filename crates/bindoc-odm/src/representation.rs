//! Representation directives.

use std::fmt;

/// Selects which wire variant a member is written as, from the finite set
/// its declared type supports.
///
/// A directive outside the type's supported set is rejected when the class
/// map is built, never at serialize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Double,
    String,
    Document,
    Array,
    Binary,
    Boolean,
    DateTime,
    Null,
    Int32,
    Int64,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::Double => "Double",
            Representation::String => "String",
            Representation::Document => "Document",
            Representation::Array => "Array",
            Representation::Binary => "Binary",
            Representation::Boolean => "Boolean",
            Representation::DateTime => "DateTime",
            Representation::Null => "Null",
            Representation::Int32 => "Int32",
            Representation::Int64 => "Int64",
        };
        f.write_str(name)
    }
}
