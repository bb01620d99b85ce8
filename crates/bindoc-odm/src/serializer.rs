//! The serializer capability and the family-fallback trait.

use std::sync::Arc;

use bindoc_wire::DocValue;

use crate::error::DecodeError;
use crate::representation::Representation;

/// A stateless conversion capability bound to exactly one application type.
///
/// Serializers are created once, shared behind `Arc`, and held for the
/// process lifetime. `write` is total: the representation it receives has
/// already been validated against [`supported`](WireSerializer::supported)
/// when the class map was built. `read` dispatches on the wire variant it
/// finds, accepting any variant the type can legally be written as.
pub trait WireSerializer<V>: Send + Sync {
    /// The finite set of legal representations, default first.
    fn supported(&self) -> &'static [Representation];

    fn default_representation(&self) -> Representation {
        self.supported()[0]
    }

    fn write(&self, value: &V, representation: Representation) -> DocValue;

    fn read(&self, value: &DocValue, representation: Representation) -> Result<V, DecodeError>;
}

/// Wire-mappable application type.
///
/// The registry resolves an exact registration first; `family_serializer`
/// is the declared-family fallback consulted afterwards (sequences and
/// optional values get blanket implementations). Types with neither an
/// exact registration nor a family resolve to `UnsupportedTypeError`.
pub trait Mapped: Sized + Send + Sync + 'static {
    fn family_serializer() -> Option<Arc<dyn WireSerializer<Self>>> {
        None
    }
}

impl Mapped for bool {}
impl Mapped for char {}
impl Mapped for String {}
impl Mapped for i8 {}
impl Mapped for u8 {}
impl Mapped for i16 {}
impl Mapped for u16 {}
impl Mapped for i32 {}
impl Mapped for u32 {}
impl Mapped for i64 {}
impl Mapped for u64 {}
impl Mapped for f32 {}
impl Mapped for f64 {}
impl Mapped for crate::types::BitSeq {}
impl Mapped for crate::types::TimeSpan {}
impl Mapped for crate::types::UtcDateTime {}
impl Mapped for crate::types::OffsetDateTime {}
impl Mapped for crate::types::Version {}
impl Mapped for crate::types::LocaleId {}
impl Mapped for crate::types::Uri {}

/// Name of the wire variant, for mismatch diagnostics.
pub(crate) fn variant_name(value: &DocValue) -> &'static str {
    match value {
        DocValue::Double(_) => "Double",
        DocValue::Str(_) => "String",
        DocValue::Document(_) => "Document",
        DocValue::Array(_) => "Array",
        DocValue::Binary(_) => "Binary",
        DocValue::Boolean(_) => "Boolean",
        DocValue::DateTime(_) => "DateTime",
        DocValue::Null => "Null",
        DocValue::Int32(_) => "Int32",
        DocValue::Int64(_) => "Int64",
    }
}

pub(crate) fn mismatch(expected: &'static str, actual: &DocValue) -> DecodeError {
    DecodeError::TypeMismatch {
        expected,
        actual: variant_name(actual),
    }
}
