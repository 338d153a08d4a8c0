//! TOML config loading for the fleet.
//!
//! ```toml
//! probe_timeout_ms = 5000
//! sweep_interval_secs = 30
//!
//! [[services]]
//! key = "pricing"
//! name = "Pricing API"
//! url = "http://pricing.internal:8080"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::RegistryResult;
use crate::registry::{ServiceDescriptor, ServiceRegistry};

/// Default per-probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

/// Top-level fleet configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    /// Per-probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Interval between automatic sweeps. Absent disables the
    /// background sweeper; sweeps then only run on demand.
    #[serde(default)]
    pub sweep_interval_secs: Option<u64>,
    /// Registered backend services.
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

/// One `[[services]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEntry {
    pub key: String,
    pub name: String,
    pub url: String,
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl FleetConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(input: &str) -> RegistryResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a config from a file path.
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        info!(?path, services = config.services.len(), "fleet config loaded");
        Ok(config)
    }

    /// Per-probe timeout as a `Duration`.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Sweep interval as a `Duration`, if the sweeper is enabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_secs.map(Duration::from_secs)
    }

    /// Build the immutable registry from the configured services.
    pub fn build_registry(&self) -> RegistryResult<ServiceRegistry> {
        let descriptors = self
            .services
            .iter()
            .map(|entry| ServiceDescriptor {
                key: entry.key.clone(),
                display_name: entry.name.clone(),
                base_address: entry.url.clone(),
            })
            .collect();
        ServiceRegistry::new(descriptors)
    }
}
