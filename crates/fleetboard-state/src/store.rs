//! StatusStore — concurrently updated map of per-service health.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use fleetboard_registry::ServiceRegistry;

use crate::types::{HealthState, ServiceStatus, StatusSnapshot};

/// Thread-safe store of the last known status per service key.
///
/// The key set is fixed at construction to exactly the registry's key
/// set. Updates replace an entry whole and enforce per-key timestamp
/// monotonicity; an update carrying an older observation time than the
/// stored one is discarded.
#[derive(Debug, Clone)]
pub struct StatusStore {
    entries: Arc<RwLock<HashMap<String, ServiceStatus>>>,
}

impl StatusStore {
    /// Create a store with one `Unknown` entry per registered service.
    pub fn new(registry: &ServiceRegistry) -> Self {
        let entries = registry
            .iter()
            .map(|svc| {
                (
                    svc.key.clone(),
                    ServiceStatus {
                        display_name: svc.display_name.clone(),
                        state: HealthState::Unknown,
                        last_observed_at: None,
                    },
                )
            })
            .collect();

        debug!(count = registry.len(), "status store initialized");
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Record a completed probe for `key`.
    ///
    /// Returns `true` if the entry was replaced, `false` if the update
    /// was discarded: either the key is not registered, or the stored
    /// entry already carries a newer observation time. The read-modify-
    /// write happens under the write lock, so concurrent updates for
    /// the same key serialize and the monotonicity rule holds.
    pub async fn update(
        &self,
        key: &str,
        state: HealthState,
        observed_at: DateTime<Utc>,
    ) -> bool {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(key) else {
            debug!(%key, "status update for unregistered key discarded");
            return false;
        };

        if let Some(stored) = entry.last_observed_at
            && stored > observed_at
        {
            debug!(%key, "stale status update discarded");
            return false;
        }

        entry.state = state;
        entry.last_observed_at = Some(observed_at);
        true
    }

    /// Current status of a single service, if registered.
    pub async fn get(&self, key: &str) -> Option<ServiceStatus> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    /// Read-only copy of the full map for rendering.
    ///
    /// The lock is held only for the duration of the clone, so writers
    /// are never blocked for long, and entries are cloned whole — a
    /// reader can never observe a half-updated record.
    pub async fn snapshot(&self) -> StatusSnapshot {
        let entries = self.entries.read().await;
        entries.clone()
    }

    /// Number of tracked services.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    /// Whether the store tracks no services.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
