//! Discriminator resolution for polymorphic hierarchies.
//!
//! A process-wide, append-only registry maps concrete types to
//! discriminator values. On write, a value whose runtime type differs from
//! the declared type (or whose entry demands it) carries the discriminator
//! element first; on read, a present discriminator resolves to the concrete
//! type before any class-map lookup.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use bindoc_wire::{DocValue, Document};

use crate::class_map::{class_map, DocumentMapped, DISCRIMINATOR_ELEMENT_NAME};
use crate::error::{DecodeError, EncodeError, PolymorphismError};

/// A discriminator value: a bare type name, or the chain of ancestor names
/// ending in the concrete one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscriminatorValue {
    Name(String),
    Ancestry(Vec<String>),
}

impl DiscriminatorValue {
    /// The resolution key: the name itself, or the last ancestry element.
    fn key(&self) -> Option<&str> {
        match self {
            DiscriminatorValue::Name(name) => Some(name),
            DiscriminatorValue::Ancestry(names) => names.last().map(String::as_str),
        }
    }

    fn to_doc_value(&self) -> DocValue {
        match self {
            DiscriminatorValue::Name(name) => DocValue::Str(name.clone()),
            DiscriminatorValue::Ancestry(names) => DocValue::Array(
                names
                    .iter()
                    .map(|name| DocValue::Str(name.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for DiscriminatorValue {
    fn from(name: &str) -> Self {
        DiscriminatorValue::Name(name.to_owned())
    }
}

impl From<String> for DiscriminatorValue {
    fn from(name: String) -> Self {
        DiscriminatorValue::Name(name)
    }
}

struct Entry {
    type_id: TypeId,
    value: DiscriminatorValue,
    required: bool,
    write: fn(&(dyn Any + Send + Sync)) -> Result<Document, EncodeError>,
    read: fn(&Document) -> Result<Box<dyn Any + Send + Sync>, DecodeError>,
}

fn write_shim<T: DocumentMapped>(
    value: &(dyn Any + Send + Sync),
) -> Result<Document, EncodeError> {
    let concrete = value
        .downcast_ref::<T>()
        .ok_or(PolymorphismError::UnregisteredType)?;
    Ok(class_map::<T>()?.to_document(concrete))
}

fn read_shim<T: DocumentMapped>(doc: &Document) -> Result<Box<dyn Any + Send + Sync>, DecodeError> {
    let value = class_map::<T>()?.from_document(doc)?;
    Ok(Box::new(value))
}

struct Maps {
    by_key: HashMap<String, Arc<Entry>>,
    by_type: HashMap<TypeId, Arc<Entry>>,
}

pub struct DiscriminatorRegistry {
    maps: RwLock<Maps>,
}

impl DiscriminatorRegistry {
    pub fn global() -> &'static DiscriminatorRegistry {
        static GLOBAL: OnceLock<DiscriminatorRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| DiscriminatorRegistry {
            maps: RwLock::new(Maps {
                by_key: HashMap::new(),
                by_type: HashMap::new(),
            }),
        })
    }

    /// Registers `T` under a discriminator value. A value already claimed
    /// by a different type is rejected here, at registration time, never
    /// deferred to read time. Re-registering the same pair is idempotent.
    pub fn register<T: DocumentMapped>(
        &self,
        value: DiscriminatorValue,
        required: bool,
    ) -> Result<(), PolymorphismError> {
        let key = value
            .key()
            .ok_or(PolymorphismError::MalformedDiscriminator)?
            .to_owned();
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = maps.by_key.get(&key) {
            if existing.type_id != TypeId::of::<T>() {
                return Err(PolymorphismError::AmbiguousRegistration(key));
            }
            return Ok(());
        }
        let entry = Arc::new(Entry {
            type_id: TypeId::of::<T>(),
            value,
            required,
            write: write_shim::<T>,
            read: read_shim::<T>,
        });
        maps.by_key.insert(key, entry.clone());
        maps.by_type.insert(TypeId::of::<T>(), entry);
        Ok(())
    }

    fn entry_for_type(&self, type_id: TypeId) -> Option<Arc<Entry>> {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .get(&type_id)
            .cloned()
    }

    fn entry_for_key(&self, key: &str) -> Option<Arc<Entry>> {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_key
            .get(key)
            .cloned()
    }
}

/// Registers a discriminator for `T` in the global registry.
pub fn register_discriminator<T: DocumentMapped>(
    value: impl Into<DiscriminatorValue>,
) -> Result<(), PolymorphismError> {
    DiscriminatorRegistry::global().register::<T>(value.into(), false)
}

/// As [`register_discriminator`], but the tag is written even when the
/// runtime type equals the declared type.
pub fn register_discriminator_required<T: DocumentMapped>(
    value: impl Into<DiscriminatorValue>,
) -> Result<(), PolymorphismError> {
    DiscriminatorRegistry::global().register::<T>(value.into(), true)
}

/// Serializes a value through a base-typed reference. The discriminator
/// element is injected first when the runtime type differs from `declared`
/// or its registration demands one.
pub fn to_document_dyn(
    value: &(dyn Any + Send + Sync),
    declared: TypeId,
) -> Result<Document, EncodeError> {
    let entry = DiscriminatorRegistry::global()
        .entry_for_type(value.type_id())
        .ok_or(PolymorphismError::UnregisteredType)?;
    let body = (entry.write)(value)?;
    if value.type_id() != declared || entry.required {
        let mut doc = Document::with_capacity(body.len() + 1);
        doc.push(DISCRIMINATOR_ELEMENT_NAME, entry.value.to_doc_value());
        for (key, field) in body.into_iter() {
            doc.push(key, field);
        }
        Ok(doc)
    } else {
        Ok(body)
    }
}

/// Deserializes a document against `declared`, honoring a present
/// discriminator element first.
pub fn from_document_dyn(
    doc: &Document,
    declared: TypeId,
) -> Result<Box<dyn Any + Send + Sync>, DecodeError> {
    let registry = DiscriminatorRegistry::global();
    let entry = match doc.get(DISCRIMINATOR_ELEMENT_NAME) {
        Some(tag) => {
            let key = discriminator_key(tag)?;
            registry
                .entry_for_key(key)
                .ok_or_else(|| PolymorphismError::UnknownDiscriminator(key.to_owned()))?
        }
        None => registry
            .entry_for_type(declared)
            .ok_or(PolymorphismError::UnregisteredType)?,
    };
    (entry.read)(doc)
}

/// The resolution key of a discriminator element: the string itself, or
/// the last element of an ancestry array.
fn discriminator_key(tag: &DocValue) -> Result<&str, PolymorphismError> {
    match tag {
        DocValue::Str(name) => Ok(name),
        DocValue::Array(names) => match names.last() {
            Some(DocValue::Str(name)) => Ok(name),
            _ => Err(PolymorphismError::MalformedDiscriminator),
        },
        _ => Err(PolymorphismError::MalformedDiscriminator),
    }
}
