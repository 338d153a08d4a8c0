//! fleetboard-registry — the static service registry for Fleetboard.
//!
//! Holds the immutable list of backend services the aggregator watches.
//! Descriptors are loaded once at process start (usually from a TOML
//! config file) and never change for the lifetime of the process.
//!
//! The `ServiceRegistry` is `Clone` + `Send` + `Sync` (backed by an
//! `Arc`) and can be shared across async tasks.

pub mod config;
pub mod error;
pub mod registry;

pub use config::{FleetConfig, ServiceEntry};
pub use error::{RegistryError, RegistryResult};
pub use registry::{ServiceDescriptor, ServiceRegistry};
