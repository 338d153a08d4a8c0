//! Domain types for the status store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health of a service as determined by its most recent probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// The last probe got a 2xx response within the timeout.
    Healthy,
    /// The last probe failed: non-2xx, connection error, or timeout.
    Unhealthy,
    /// Never probed since process start.
    Unknown,
}

/// Last known status of one registered service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Copied from the descriptor for display convenience.
    pub display_name: String,
    pub state: HealthState,
    /// Completion time of the most recent probe, absent until the
    /// first probe finishes.
    pub last_observed_at: Option<DateTime<Utc>>,
}

/// Read-only copy of the full store, keyed by service key.
pub type StatusSnapshot = HashMap<String, ServiceStatus>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&HealthState::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthState::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthState::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn service_status_round_trips_through_json() {
        let status = ServiceStatus {
            display_name: "Pricing API".to_string(),
            state: HealthState::Healthy,
            last_observed_at: Some(Utc::now()),
        };

        let json = serde_json::to_string(&status).unwrap();
        let back: ServiceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
