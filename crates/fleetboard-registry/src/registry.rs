//! The service registry — immutable descriptors keyed by service key.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};

/// Describes one registered backend service.
///
/// Created at process start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Stable identifier, unique across the registry.
    pub key: String,
    /// Human-readable label for dashboards.
    pub display_name: String,
    /// Network location the health probe targets, e.g. `10.0.0.1:8080`
    /// or `http://pricing.internal:8080`.
    pub base_address: String,
}

/// Immutable, shareable set of service descriptors.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    services: Vec<ServiceDescriptor>,
    /// key → index into `services`.
    by_key: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Build a registry from descriptors. Keys must be unique and the
    /// list must be non-empty.
    pub fn new(services: Vec<ServiceDescriptor>) -> RegistryResult<Self> {
        if services.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut by_key = HashMap::with_capacity(services.len());
        for (idx, svc) in services.iter().enumerate() {
            if by_key.insert(svc.key.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateKey(svc.key.clone()));
            }
        }

        debug!(count = services.len(), "service registry built");
        Ok(Self {
            inner: Arc::new(Inner { services, by_key }),
        })
    }

    /// Look up a descriptor by its key.
    pub fn get(&self, key: &str) -> Option<&ServiceDescriptor> {
        self.inner
            .by_key
            .get(key)
            .map(|&idx| &self.inner.services[idx])
    }

    /// Whether a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.by_key.contains_key(key)
    }

    /// Iterate over all descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.inner.services.iter()
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.inner.services.len()
    }

    /// Whether the registry is empty. Always false for a constructed
    /// registry, kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.inner.services.is_empty()
    }
}
