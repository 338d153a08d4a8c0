//! fleetboard-api — REST API for Fleetboard.
//!
//! The boundary the dashboard UI consumes: read the current health
//! snapshot and trigger sweeps on demand. Aggregate counts and "last
//! full sweep" time are derived client-side from the snapshot.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/services` | Current health snapshot |
//! | POST | `/api/v1/services/{key}/check` | Probe one service now |
//! | POST | `/api/v1/sweep` | Probe every service now |
//! | GET | `/healthz` | Liveness of the aggregator itself |

pub mod handlers;

use axum::Router;
use axum::routing::{get, post};
use fleetboard_health::Sweeper;
use fleetboard_state::StatusStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: StatusStore,
    pub sweeper: Sweeper,
}

/// Build the complete API router.
pub fn build_router(store: StatusStore, sweeper: Sweeper) -> Router {
    let state = ApiState { store, sweeper };

    let api_routes = Router::new()
        .route("/services", get(handlers::snapshot))
        .route("/services/{key}/check", post(handlers::check_one))
        .route("/sweep", post(handlers::sweep))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/healthz", get(handlers::healthz))
}
