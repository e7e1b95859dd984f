//! Dependency registry.
//!
//! Descriptors are registered as deferred builders and only materialized
//! into [`Dependency`] values when first looked up, so defining a large
//! catalog costs nothing until something is actually checked.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::catalog;
use super::dependency::{Dependency, DependencyBuilder};
use crate::error::Result;

/// Deferred constructor for a dependency descriptor.
pub type DescriptorBuilder = Box<dyn Fn(DependencyBuilder) -> DependencyBuilder + Send + Sync>;

/// One registry slot.
enum Slot {
    Unbuilt(DescriptorBuilder),
    Built(Arc<Dependency>),
}

/// Registry of dependency descriptors keyed by identifier.
///
/// Builders run while the registry is locked and therefore must not call
/// back into the same registry.
pub struct DependencyRegistry {
    slots: Mutex<HashMap<String, Slot>>,
}

impl DependencyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in catalog.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        catalog::register_builtins(&registry);
        registry
    }

    /// Register `identifier`, replacing any earlier definition.
    pub fn define<F>(&self, identifier: impl Into<String>, builder: F)
    where
        F: Fn(DependencyBuilder) -> DependencyBuilder + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        let previous = self
            .slots()
            .insert(identifier.clone(), Slot::Unbuilt(Box::new(builder)));
        if previous.is_some() {
            tracing::debug!("Redefined dependency {}", identifier);
        }
    }

    /// Look up `identifier`, materializing it on first access.
    ///
    /// Returns `Ok(None)` for unknown identifiers. A descriptor that fails
    /// to build is a bug in its definition and is returned as an error;
    /// the slot stays unbuilt.
    pub fn find(&self, identifier: &str) -> Result<Option<Arc<Dependency>>> {
        let mut slots = self.slots();
        let Some(slot) = slots.get_mut(identifier) else {
            return Ok(None);
        };

        let dependency = match slot {
            Slot::Built(dependency) => return Ok(Some(Arc::clone(dependency))),
            Slot::Unbuilt(builder) => {
                Arc::new(builder(DependencyBuilder::new(identifier)).build()?)
            }
        };

        tracing::debug!("Materialized dependency {}", identifier);
        *slot = Slot::Built(Arc::clone(&dependency));
        Ok(Some(dependency))
    }

    /// Whether `identifier` has been defined.
    pub fn is_defined(&self, identifier: &str) -> bool {
        self.slots().contains_key(identifier)
    }

    /// Whether `identifier` has been materialized.
    pub fn is_materialized(&self, identifier: &str) -> bool {
        matches!(self.slots().get(identifier), Some(Slot::Built(_)))
    }

    /// All defined identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.slots().keys().cloned().collect();
        ids.sort();
        ids
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
