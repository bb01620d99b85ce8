//! Document-level entry points for mapped types.

use std::any::{Any, TypeId};

use bindoc_wire::{DocDecoder, DocEncoder, Document, TextRenderer};

use crate::class_map::{class_map, DocumentMapped};
use crate::discriminator;
use crate::error::{ConfigurationError, DecodeError, EncodeError};

pub fn to_document<T: DocumentMapped>(value: &T) -> Result<Document, ConfigurationError> {
    Ok(class_map::<T>()?.to_document(value))
}

pub fn to_bytes<T: DocumentMapped>(value: &T) -> Result<Vec<u8>, ConfigurationError> {
    Ok(DocEncoder::new().encode(&to_document(value)?))
}

/// Renders a value in the extended text form.
pub fn to_text<T: DocumentMapped>(value: &T) -> Result<String, ConfigurationError> {
    Ok(TextRenderer::new().render_document(&to_document(value)?))
}

pub fn from_document<T: DocumentMapped>(doc: &Document) -> Result<T, DecodeError> {
    class_map::<T>()?.from_document(doc)
}

pub fn from_bytes<T: DocumentMapped>(bytes: &[u8]) -> Result<T, DecodeError> {
    from_document(&DocDecoder::decode(bytes)?)
}

/// Serializes through a base-typed reference, tagging the concrete type
/// when it differs from `declared`.
pub fn to_bytes_dyn(
    value: &(dyn Any + Send + Sync),
    declared: TypeId,
) -> Result<Vec<u8>, EncodeError> {
    let doc = discriminator::to_document_dyn(value, declared)?;
    Ok(DocEncoder::new().encode(&doc))
}

/// Deserializes against `declared`, resolving a present discriminator to
/// the registered concrete type first.
pub fn from_bytes_dyn(
    bytes: &[u8],
    declared: TypeId,
) -> Result<Box<dyn Any + Send + Sync>, DecodeError> {
    let doc = DocDecoder::decode(bytes)?;
    discriminator::from_document_dyn(&doc, declared)
}
