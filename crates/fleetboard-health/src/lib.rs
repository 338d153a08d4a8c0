//! fleetboard-health — health probing and sweep orchestration.
//!
//! Determines, for every registered backend service, whether it is
//! currently reachable and responding, and merges the results into the
//! shared status store.
//!
//! # Architecture
//!
//! ```text
//! Sweeper
//!   ├── check_all() — one spawned probe task per descriptor,
//!   │                 all-settled join, incremental store updates
//!   ├── check_one(key) — single probe + store update
//!   └── run() — periodic sweep loop with watch-channel shutdown
//! Probe
//!   └── http_probe() → ProbeOutcome (Healthy | Unhealthy, never errors)
//! ```
//!
//! A probe races the HTTP request against its timeout; the losing side
//! is dropped, which tears down the underlying connection. Every
//! failure mode — refused connection, DNS, non-2xx, timeout — collapses
//! into `Unhealthy`, so nothing past the probe carries an error channel.

pub mod probe;
pub mod sweep;

pub use probe::{ProbeOutcome, ProbeVerdict, http_probe};
pub use sweep::{SweepError, Sweeper};
