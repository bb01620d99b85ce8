//! Error taxonomy for the mapping layer.
//!
//! All of these are deterministic, input-dependent failures surfaced to the
//! immediate caller. None are retried, swallowed, or defaulted.

use thiserror::Error;

use bindoc_wire::FormatError;

use crate::representation::Representation;

/// No serializer is resolvable for a type, neither by exact registration
/// nor by family fallback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no serializer registered for type {0}")]
pub struct UnsupportedTypeError(pub &'static str);

/// Illegal mapping configuration, detected while building a class map,
/// before any value is touched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("representation {representation} is not legal for {type_name}")]
    IllegalRepresentation {
        type_name: &'static str,
        representation: Representation,
    },
    #[error("duplicate member name {0:?}")]
    DuplicateMember(String),
    #[error("type {0} declares more than one identifier member")]
    MultipleIdentifiers(&'static str),
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),
}

/// Discriminator registration or resolution failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolymorphismError {
    #[error("discriminator value {0:?} is already registered for a different type")]
    AmbiguousRegistration(String),
    #[error("discriminator value {0:?} is not registered")]
    UnknownDiscriminator(String),
    #[error("the runtime type has no registered discriminator")]
    UnregisteredType,
    #[error("discriminator field has an unexpected shape")]
    MalformedDiscriminator,
}

/// A value is present but not convertible under the requested
/// representation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("expected {expected} but found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("value {value:?} is out of range for {type_name}")]
    OutOfRange {
        type_name: &'static str,
        value: String,
    },
    #[error("cannot parse {value:?} as {type_name}")]
    Parse {
        type_name: &'static str,
        value: String,
    },
    #[error("binary payload of {len} bytes is not valid for {type_name}")]
    BinaryLength {
        type_name: &'static str,
        len: usize,
    },
    #[error("unexpected element {0:?}")]
    UnexpectedMember(String),
    #[error("required element {0:?} is missing")]
    MissingMember(&'static str),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Polymorphism(#[from] PolymorphismError),
}

/// Failures of the document-level polymorphic write path.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Polymorphism(#[from] PolymorphismError),
}
