//! Sweep orchestration — fan a probe out to every registered service.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use fleetboard_registry::ServiceRegistry;
use fleetboard_state::{HealthState, StatusStore};

use crate::probe::{self, http_probe};

/// Errors a sweep operation can surface.
///
/// Probe faults never appear here — they collapse to `Unhealthy` inside
/// the probe. The only outward error is a caller bug.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("unknown service key: {0}")]
    UnknownKey(String),
}

/// Runs liveness checks against the registered fleet and merges the
/// results into the status store.
#[derive(Clone)]
pub struct Sweeper {
    registry: ServiceRegistry,
    store: StatusStore,
    timeout: Duration,
}

impl Sweeper {
    /// Create a sweeper with the default probe timeout.
    pub fn new(registry: ServiceRegistry, store: StatusStore) -> Self {
        Self {
            registry,
            store,
            timeout: probe::DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe a single service and record the result.
    ///
    /// Errors only when `key` is not in the registry; every probe fault
    /// is recorded as `Unhealthy` and still returns `Ok`.
    pub async fn check_one(&self, key: &str) -> Result<HealthState, SweepError> {
        let descriptor = self
            .registry
            .get(key)
            .ok_or_else(|| SweepError::UnknownKey(key.to_string()))?;

        let outcome = http_probe(&descriptor.base_address, self.timeout).await;
        let state = outcome.verdict.as_health_state();

        let recorded = self.store.update(key, state, outcome.observed_at).await;
        if !recorded {
            debug!(%key, "probe result lost the per-key timestamp race");
        }

        match state {
            HealthState::Healthy => debug!(%key, "probe healthy"),
            _ => warn!(%key, address = %descriptor.base_address, "probe unhealthy"),
        }

        Ok(state)
    }

    /// Probe every registered service concurrently.
    ///
    /// One task is spawned per descriptor, so total wall-clock time is
    /// bounded by the slowest single probe, not the sum. The join is
    /// all-settled: a slow or failing service never delays or aborts
    /// the reporting of the others, and the store is updated as each
    /// probe completes, so mid-sweep readers see partial progress.
    /// Never errors outward.
    pub async fn check_all(&self) -> Vec<(String, HealthState)> {
        let mut handles = Vec::with_capacity(self.registry.len());

        for descriptor in self.registry.iter() {
            let sweeper = self.clone();
            let key = descriptor.key.clone();
            handles.push(tokio::spawn(async move {
                // Key comes straight from the registry, so check_one
                // cannot see UnknownKey here.
                let state = sweeper
                    .check_one(&key)
                    .await
                    .unwrap_or(HealthState::Unhealthy);
                (key, state)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut healthy = 0usize;
        for handle in handles {
            match handle.await {
                Ok((key, state)) => {
                    if state == HealthState::Healthy {
                        healthy += 1;
                    }
                    results.push((key, state));
                }
                Err(e) => {
                    warn!(error = %e, "probe task join error");
                }
            }
        }

        info!(
            total = results.len(),
            healthy,
            unhealthy = results.len() - healthy,
            "sweep completed"
        );
        results
    }

    /// Periodic sweep loop.
    ///
    /// Sweeps immediately, then every `interval`, until the shutdown
    /// watch channel flips.
    pub async fn run(self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = interval.as_secs(), "background sweeper started");

        loop {
            self.check_all().await;

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => {
                    info!("background sweeper stopping");
                    break;
                }
            }
        }
    }
}
