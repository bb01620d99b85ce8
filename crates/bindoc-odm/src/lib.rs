//! Convention-driven object-document mapping over the bindoc wire format.
//!
//! Application types declare an ordered member table ([`DocumentMapped`]);
//! building a [`ClassMap`] resolves each member's serializer through the
//! process-wide [`SerializerRegistry`], validates its representation
//! directive, and applies the identifier convention chain. Polymorphic
//! hierarchies round-trip through the discriminator registry.

pub mod class_map;
pub mod conventions;
pub mod discriminator;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod representation;
pub mod serializer;
pub mod serializers;
pub mod types;

pub use class_map::{
    class_map, ClassMap, ClassMapBuilder, DocumentMapped, MemberHandle, DISCRIMINATOR_ELEMENT_NAME,
    ID_ELEMENT_NAME,
};
pub use conventions::{register_id_convention, IdConvention, NamedIdConvention};
pub use discriminator::{
    from_document_dyn, register_discriminator, register_discriminator_required, to_document_dyn,
    DiscriminatorRegistry, DiscriminatorValue,
};
pub use error::{
    ConfigurationError, DecodeError, EncodeError, PolymorphismError, UnsupportedTypeError,
};
pub use mapper::{from_bytes, from_bytes_dyn, from_document, to_bytes, to_bytes_dyn, to_document, to_text};
pub use registry::{register_serializer, SerializerRegistry};
pub use representation::Representation;
pub use serializer::{Mapped, WireSerializer};
pub use serializers::{OptionSerializer, SequenceSerializer};
pub use types::{BitSeq, LocaleId, OffsetDateTime, TimeSpan, Uri, UtcDateTime, Version};
