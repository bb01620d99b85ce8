//! Built-in serializers for the wire-eligible primitive and framework
//! types, one module per family.

pub mod binary;
pub mod floats;
pub mod integers;
pub mod locale;
pub mod scalars;
pub mod sequence;
pub mod time;
pub mod uri;
pub mod version;

use std::sync::Arc;

use crate::registry::SerializerRegistry;
use crate::types::{BitSeq, LocaleId, OffsetDateTime, TimeSpan, Uri, UtcDateTime, Version};

pub use binary::{BitSeqSerializer, ByteVecSerializer};
pub use floats::{Float32Serializer, Float64Serializer};
pub use integers::{
    Int16Serializer, Int32Serializer, Int64Serializer, Int8Serializer, UInt16Serializer,
    UInt32Serializer, UInt64Serializer, UInt8Serializer,
};
pub use locale::LocaleIdSerializer;
pub use scalars::{BooleanSerializer, CharSerializer, StringSerializer};
pub use sequence::{OptionSerializer, SequenceSerializer};
pub use time::{OffsetDateTimeSerializer, TimeSpanSerializer, UtcDateTimeSerializer};
pub use uri::UriSerializer;
pub use version::VersionSerializer;

/// Seeds the registry with every built-in binding.
///
/// The exact `Vec<u8>` entry shadows the sequence-family fallback, so byte
/// sequences get the Binary/String serializer rather than an array of
/// integers.
pub(crate) fn seed_builtins(registry: &SerializerRegistry) {
    registry.register::<bool>(Arc::new(BooleanSerializer));
    registry.register::<char>(Arc::new(CharSerializer));
    registry.register::<String>(Arc::new(StringSerializer));
    registry.register::<i8>(Arc::new(Int8Serializer));
    registry.register::<u8>(Arc::new(UInt8Serializer));
    registry.register::<i16>(Arc::new(Int16Serializer));
    registry.register::<u16>(Arc::new(UInt16Serializer));
    registry.register::<i32>(Arc::new(Int32Serializer));
    registry.register::<u32>(Arc::new(UInt32Serializer));
    registry.register::<i64>(Arc::new(Int64Serializer));
    registry.register::<u64>(Arc::new(UInt64Serializer));
    registry.register::<f32>(Arc::new(Float32Serializer));
    registry.register::<f64>(Arc::new(Float64Serializer));
    registry.register::<Vec<u8>>(Arc::new(ByteVecSerializer));
    registry.register::<BitSeq>(Arc::new(BitSeqSerializer));
    registry.register::<TimeSpan>(Arc::new(TimeSpanSerializer));
    registry.register::<UtcDateTime>(Arc::new(UtcDateTimeSerializer));
    registry.register::<OffsetDateTime>(Arc::new(OffsetDateTimeSerializer));
    registry.register::<Version>(Arc::new(VersionSerializer));
    registry.register::<LocaleId>(Arc::new(LocaleIdSerializer));
    registry.register::<Uri>(Arc::new(UriSerializer));
}
