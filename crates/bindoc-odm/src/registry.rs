//! Process-wide serializer registry.
//!
//! Seeded once with the built-in serializers, extensible via
//! [`register_serializer`]. Bindings are published by replacement: a reader
//! observes the old or the new `Arc`, never a torn entry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::UnsupportedTypeError;
use crate::serializer::{Mapped, WireSerializer};
use crate::serializers;

pub struct SerializerRegistry {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl SerializerRegistry {
    fn empty() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry, seeded on first use.
    pub fn global() -> &'static SerializerRegistry {
        static GLOBAL: OnceLock<SerializerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = SerializerRegistry::empty();
            serializers::seed_builtins(&registry);
            registry
        })
    }

    /// Registers (or replaces) the serializer for `V`.
    pub fn register<V: 'static>(&self, serializer: Arc<dyn WireSerializer<V>>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<V>(), Arc::new(serializer));
    }

    /// Resolves the serializer for `V`: exact registration first, then the
    /// declared-family fallback, then failure.
    pub fn lookup<V: Mapped>(&self) -> Result<Arc<dyn WireSerializer<V>>, UnsupportedTypeError> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(&TypeId::of::<V>()) {
                if let Some(serializer) = entry.downcast_ref::<Arc<dyn WireSerializer<V>>>() {
                    return Ok(serializer.clone());
                }
            }
        }
        V::family_serializer().ok_or(UnsupportedTypeError(std::any::type_name::<V>()))
    }
}

/// Registers a serializer in the global registry.
pub fn register_serializer<V: 'static>(serializer: Arc<dyn WireSerializer<V>>) {
    SerializerRegistry::global().register(serializer);
}
