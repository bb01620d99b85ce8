//! Class maps: per-type member tables resolved once and cached for the
//! process lifetime.
//!
//! A mapped type supplies its member table in declaration order through
//! [`ClassMapBuilder`]; building resolves each member's serializer and
//! representation, applies the identifier convention chain, and publishes
//! an immutable [`ClassMap`]. Directive validation happens here, never at
//! serialize time.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use bindoc_wire::{DocValue, Document};

use crate::conventions;
use crate::error::{ConfigurationError, DecodeError};
use crate::registry::SerializerRegistry;
use crate::representation::Representation;
use crate::serializer::{Mapped, WireSerializer};

/// The wire name identifier members are serialized under, always first.
pub const ID_ELEMENT_NAME: &str = "_id";

/// The wire name of the discriminator element.
pub const DISCRIMINATOR_ELEMENT_NAME: &str = "_t";

/// A type that maps to documents through a declared member table.
pub trait DocumentMapped: Default + Send + Sync + 'static {
    fn map(builder: &mut ClassMapBuilder<Self>);
}

// ----------------------------------------------------------------
// Resolved members

trait MemberCodec<T>: Send + Sync {
    fn wire_name(&self) -> &str;
    fn write_into(&self, owner: &T, doc: &mut Document);
    fn read_from(&self, owner: &mut T, value: &DocValue) -> Result<(), DecodeError>;
    fn apply_default(&self, owner: &mut T);
}

struct MappedMember<T, V> {
    wire_name: String,
    get: fn(&T) -> V,
    set: fn(&mut T, V),
    serializer: Arc<dyn WireSerializer<V>>,
    representation: Representation,
    default_value: Option<V>,
    omit_if_default: bool,
}

impl<T, V> MemberCodec<T> for MappedMember<T, V>
where
    V: Clone + PartialEq + Send + Sync,
{
    fn wire_name(&self) -> &str {
        &self.wire_name
    }

    fn write_into(&self, owner: &T, doc: &mut Document) {
        let value = (self.get)(owner);
        if self.omit_if_default {
            if let Some(default) = &self.default_value {
                if value == *default {
                    return;
                }
            }
        }
        doc.push(
            self.wire_name.clone(),
            self.serializer.write(&value, self.representation),
        );
    }

    fn read_from(&self, owner: &mut T, value: &DocValue) -> Result<(), DecodeError> {
        let value = self.serializer.read(value, self.representation)?;
        (self.set)(owner, value);
        Ok(())
    }

    fn apply_default(&self, owner: &mut T) {
        if let Some(default) = &self.default_value {
            (self.set)(owner, default.clone());
        }
    }
}

// ----------------------------------------------------------------
// Builder

trait PendingMember<T>: Send + Sync {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn wire_name(&self) -> &str;
    fn is_id(&self) -> bool;
    fn mark_id(&mut self);
    fn build(&self, wire_name: String) -> Result<Box<dyn MemberCodec<T>>, ConfigurationError>;
}

struct MemberDef<T, V> {
    wire_name: String,
    get: fn(&T) -> V,
    set: fn(&mut T, V),
    serializer: Option<Arc<dyn WireSerializer<V>>>,
    representation: Option<Representation>,
    default_value: Option<V>,
    omit_if_default: bool,
    is_id: bool,
}

impl<T, V> PendingMember<T> for MemberDef<T, V>
where
    T: 'static,
    V: Mapped + Clone + PartialEq,
{
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn wire_name(&self) -> &str {
        &self.wire_name
    }

    fn is_id(&self) -> bool {
        self.is_id
    }

    fn mark_id(&mut self) {
        self.is_id = true;
    }

    fn build(&self, wire_name: String) -> Result<Box<dyn MemberCodec<T>>, ConfigurationError> {
        let serializer = match &self.serializer {
            Some(serializer) => serializer.clone(),
            None => SerializerRegistry::global().lookup::<V>()?,
        };
        let representation = match self.representation {
            Some(representation) => {
                if !serializer.supported().contains(&representation) {
                    return Err(ConfigurationError::IllegalRepresentation {
                        type_name: std::any::type_name::<V>(),
                        representation,
                    });
                }
                representation
            }
            None => serializer.default_representation(),
        };
        Ok(Box::new(MappedMember {
            wire_name,
            get: self.get,
            set: self.set,
            serializer,
            representation,
            default_value: self.default_value.clone(),
            omit_if_default: self.omit_if_default,
        }))
    }
}

/// Per-member configuration handle returned by [`ClassMapBuilder::member`].
pub struct MemberHandle<'a, T, V> {
    def: &'a mut MemberDef<T, V>,
}

impl<'a, T, V> MemberHandle<'a, T, V> {
    /// Selects the wire representation. Validated against the serializer's
    /// supported set when the class map is built.
    pub fn representation(self, representation: Representation) -> Self {
        self.def.representation = Some(representation);
        self
    }

    /// Overrides the registry-resolved serializer for this member.
    pub fn serializer(self, serializer: Arc<dyn WireSerializer<V>>) -> Self {
        self.def.serializer = Some(serializer);
        self
    }

    pub fn default_value(self, value: V) -> Self {
        self.def.default_value = Some(value);
        self
    }

    /// Skips the member on write when it equals the configured default.
    pub fn omit_if_default(self) -> Self {
        self.def.omit_if_default = true;
        self
    }

    /// Marks this member as the document identifier, overriding the
    /// convention chain.
    pub fn id(self) -> Self {
        self.def.is_id = true;
        self
    }
}

pub struct ClassMapBuilder<T> {
    members: Vec<Box<dyn PendingMember<T>>>,
}

impl<T: DocumentMapped> ClassMapBuilder<T> {
    fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Declares the next member, in declaration order.
    pub fn member<V>(
        &mut self,
        wire_name: &str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    ) -> MemberHandle<'_, T, V>
    where
        V: Mapped + Clone + PartialEq,
    {
        self.members.push(Box::new(MemberDef {
            wire_name: wire_name.to_owned(),
            get,
            set,
            serializer: None,
            representation: None,
            default_value: None,
            omit_if_default: false,
            is_id: false,
        }));
        let def = self
            .members
            .last_mut()
            .and_then(|pending| pending.as_any_mut().downcast_mut::<MemberDef<T, V>>())
            .expect("member definition was just pushed");
        MemberHandle { def }
    }

    fn into_class_map(mut self) -> Result<ClassMap<T>, ConfigurationError> {
        // Duplicate wire names are a configuration fault, not a runtime one.
        for (i, member) in self.members.iter().enumerate() {
            if self.members[..i]
                .iter()
                .any(|m| m.wire_name() == member.wire_name())
            {
                return Err(ConfigurationError::DuplicateMember(
                    member.wire_name().to_owned(),
                ));
            }
        }

        let explicit_ids = self.members.iter().filter(|m| m.is_id()).count();
        if explicit_ids > 1 {
            return Err(ConfigurationError::MultipleIdentifiers(
                std::any::type_name::<T>(),
            ));
        }
        if explicit_ids == 0 {
            let found = {
                let names: Vec<&str> = self.members.iter().map(|m| m.wire_name()).collect();
                conventions::find_identifier(&names)
            };
            if let Some(name) = found {
                for member in &mut self.members {
                    if member.wire_name() == name {
                        member.mark_id();
                        break;
                    }
                }
            }
        }

        let mut members = Vec::with_capacity(self.members.len());
        let mut identifier = None;
        // The identifier serializes first, under the fixed "_id" name.
        if let Some(id_member) = self.members.iter().find(|m| m.is_id()) {
            identifier = Some(id_member.wire_name().to_owned());
            members.push(id_member.build(ID_ELEMENT_NAME.to_owned())?);
        }
        for member in self.members.iter().filter(|m| !m.is_id()) {
            members.push(member.build(member.wire_name().to_owned())?);
        }
        Ok(ClassMap {
            members,
            identifier,
        })
    }
}

// ----------------------------------------------------------------
// The resolved map

/// Immutable per-type serialization metadata.
pub struct ClassMap<T> {
    members: Vec<Box<dyn MemberCodec<T>>>,
    identifier: Option<String>,
}

impl<T> std::fmt::Debug for ClassMap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassMap")
            .field("members", &self.members.len())
            .field("identifier", &self.identifier)
            .finish()
    }
}

impl<T: DocumentMapped> ClassMap<T> {
    fn build() -> Result<Self, ConfigurationError> {
        let mut builder = ClassMapBuilder::new();
        T::map(&mut builder);
        builder.into_class_map()
    }

    /// The declared name of the identifier member, if one was selected.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn to_document(&self, value: &T) -> Document {
        let mut doc = Document::with_capacity(self.members.len());
        for member in &self.members {
            member.write_into(value, &mut doc);
        }
        doc
    }

    pub fn from_document(&self, doc: &Document) -> Result<T, DecodeError> {
        let mut owner = T::default();
        for member in &self.members {
            member.apply_default(&mut owner);
        }
        for (key, value) in doc.iter() {
            if key == DISCRIMINATOR_ELEMENT_NAME {
                continue;
            }
            match self.members.iter().find(|m| m.wire_name() == key) {
                Some(member) => member.read_from(&mut owner, value)?,
                None => return Err(DecodeError::UnexpectedMember(key.clone())),
            }
        }
        Ok(owner)
    }
}

// ----------------------------------------------------------------
// Process-wide cache

fn cache() -> &'static RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
    static CACHE: OnceLock<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The cached class map for `T`, building and publishing it on first use.
///
/// Builds run outside the lock; publication is first-writer-wins, so two
/// concurrent builders agree on the surviving (equivalent) map and readers
/// never observe a partial one.
pub fn class_map<T: DocumentMapped>() -> Result<Arc<ClassMap<T>>, ConfigurationError> {
    let key = TypeId::of::<T>();
    {
        let cache = cache().read().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cache.get(&key) {
            if let Ok(map) = entry.clone().downcast::<ClassMap<T>>() {
                return Ok(map);
            }
        }
    }
    let built = Arc::new(ClassMap::<T>::build()?);
    let mut cache = cache().write().unwrap_or_else(PoisonError::into_inner);
    let entry = cache
        .entry(key)
        .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>);
    Ok(entry.clone().downcast::<ClassMap<T>>().unwrap_or(built))
}
