//! Identifier conventions.
//!
//! An ordered chain of strategies. Each strategy, given a type's member
//! names, either names the member that serves as the document identifier or
//! declines; the first to name one wins. A strategy naming a member the
//! type does not have counts as declining, and the chain proceeds.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

pub trait IdConvention: Send + Sync {
    fn try_find_identifier(&self, members: &[&str]) -> Option<String>;
}

/// Selects a member by its exact name.
pub struct NamedIdConvention {
    name: String,
}

impl NamedIdConvention {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl IdConvention for NamedIdConvention {
    fn try_find_identifier(&self, members: &[&str]) -> Option<String> {
        members
            .iter()
            .find(|m| **m == self.name)
            .map(|m| (*m).to_owned())
    }
}

fn chain() -> &'static RwLock<Vec<Arc<dyn IdConvention>>> {
    static CHAIN: OnceLock<RwLock<Vec<Arc<dyn IdConvention>>>> = OnceLock::new();
    CHAIN.get_or_init(|| RwLock::new(vec![Arc::new(NamedIdConvention::new("Id"))]))
}

/// Appends a strategy to the process-wide chain. Appended strategies are
/// consulted after the default `NamedIdConvention("Id")`.
pub fn register_id_convention(convention: Arc<dyn IdConvention>) {
    chain()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(convention);
}

/// Runs the chain over a type's member names.
pub(crate) fn find_identifier(members: &[&str]) -> Option<String> {
    let chain = chain().read().unwrap_or_else(PoisonError::into_inner);
    chain
        .iter()
        .find_map(|convention| convention.try_find_identifier(members))
}
