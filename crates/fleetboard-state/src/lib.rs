//! fleetboard-state — in-memory status store for Fleetboard.
//!
//! Holds the authoritative snapshot of every registered service's last
//! known health state. Written by concurrent probe completions, read by
//! dashboard consumers.
//!
//! # Architecture
//!
//! One `ServiceStatus` entry exists per registry key for the lifetime
//! of the process; entries are created `Unknown` at construction and
//! replaced whole on each completed probe. Updates carry the probe's
//! observation time and are discarded when stale, so a late-completing
//! probe from an overlapping sweep can never roll a key's status
//! backwards.
//!
//! The `StatusStore` is `Clone` + `Send` + `Sync` (backed by an
//! `Arc<RwLock<..>>`) and is injected into whatever needs it — there is
//! no ambient singleton, so tests construct isolated instances.

pub mod store;
pub mod types;

pub use store::StatusStore;
pub use types::{HealthState, ServiceStatus, StatusSnapshot};
