//! Family-fallback serializers for sequences and optional values.

use std::sync::Arc;

use bindoc_wire::DocValue;

use crate::error::DecodeError;
use crate::registry::SerializerRegistry;
use crate::representation::Representation;
use crate::serializer::{mismatch, Mapped, WireSerializer};

/// Serializes `Vec<T>` as an Array of `T`'s default representation.
pub struct SequenceSerializer<T> {
    inner: Arc<dyn WireSerializer<T>>,
}

impl<T> SequenceSerializer<T> {
    pub fn new(inner: Arc<dyn WireSerializer<T>>) -> Self {
        Self { inner }
    }
}

impl<T: Send + Sync> WireSerializer<Vec<T>> for SequenceSerializer<T> {
    fn supported(&self) -> &'static [Representation] {
        &[Representation::Array]
    }

    fn write(&self, value: &Vec<T>, _representation: Representation) -> DocValue {
        let representation = self.inner.default_representation();
        DocValue::Array(
            value
                .iter()
                .map(|item| self.inner.write(item, representation))
                .collect(),
        )
    }

    fn read(
        &self,
        value: &DocValue,
        representation: Representation,
    ) -> Result<Vec<T>, DecodeError> {
        match value {
            DocValue::Array(items) => items
                .iter()
                .map(|item| self.inner.read(item, representation))
                .collect(),
            other => Err(mismatch("sequence", other)),
        }
    }
}

/// Wraps `T`'s serializer so that the absent state maps to Null in both
/// directions. The member's directive passes straight through to `T`.
pub struct OptionSerializer<T> {
    inner: Arc<dyn WireSerializer<T>>,
}

impl<T> OptionSerializer<T> {
    pub fn new(inner: Arc<dyn WireSerializer<T>>) -> Self {
        Self { inner }
    }
}

impl<T: Send + Sync> WireSerializer<Option<T>> for OptionSerializer<T> {
    fn supported(&self) -> &'static [Representation] {
        self.inner.supported()
    }

    fn default_representation(&self) -> Representation {
        self.inner.default_representation()
    }

    fn write(&self, value: &Option<T>, representation: Representation) -> DocValue {
        match value {
            Some(inner) => self.inner.write(inner, representation),
            None => DocValue::Null,
        }
    }

    fn read(
        &self,
        value: &DocValue,
        representation: Representation,
    ) -> Result<Option<T>, DecodeError> {
        match value {
            DocValue::Null => Ok(None),
            other => Ok(Some(self.inner.read(other, representation)?)),
        }
    }
}

impl<T: Mapped> Mapped for Vec<T> {
    fn family_serializer() -> Option<Arc<dyn WireSerializer<Self>>> {
        let inner = SerializerRegistry::global().lookup::<T>().ok()?;
        Some(Arc::new(SequenceSerializer::new(inner)))
    }
}

impl<T: Mapped> Mapped for Option<T> {
    fn family_serializer() -> Option<Arc<dyn WireSerializer<Self>>> {
        let inner = SerializerRegistry::global().lookup::<T>().ok()?;
        Some(Arc::new(OptionSerializer::new(inner)))
    }
}
