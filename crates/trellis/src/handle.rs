use std::sync::Arc;

use parking_lot::RwLock;

use crate::{FlagError, FlagId, FlagRegistry, RegistrySnapshot};

/// Cloneable, thread-safe wrapper around a [`FlagRegistry`].
///
/// Mutations hold the write lock for their whole run, so a cascade is
/// never interleaved with another mutation; reads share the read lock and
/// run concurrently with each other. Methods mirror the registry's,
/// returning owned data where the plain registry hands out borrows.
#[derive(Debug, Clone, Default)]
pub struct FlagsHandle {
    inner: Arc<RwLock<FlagRegistry>>,
}

impl FlagsHandle {
    /// Wraps an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-populated registry.
    pub fn from_registry(registry: FlagRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register(&self, id: &str, default: bool, parents: &[&str]) -> Result<(), FlagError> {
        self.inner.write().register(id, default, parents)
    }

    pub fn get(&self, id: &str) -> Result<bool, FlagError> {
        self.inner.read().get(id)
    }

    pub fn set(&self, id: &str, value: bool) -> Result<(), FlagError> {
        self.inner.write().set(id, value)
    }

    pub fn flip(&self, id: &str) -> Result<bool, FlagError> {
        self.inner.write().flip(id)
    }

    pub fn check_consistency(&self) {
        self.inner.write().check_consistency()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().contains(id)
    }

    pub fn ids(&self) -> Vec<FlagId> {
        self.inner.read().ids().cloned().collect()
    }

    pub fn descendants(&self, id: &str) -> Result<Vec<FlagId>, FlagError> {
        self.inner.read().descendants(id)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.read().snapshot()
    }
}
