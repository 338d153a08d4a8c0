//! REST API handlers.
//!
//! Each handler reads the `StatusStore` or drives the `Sweeper` and
//! returns JSON responses.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::info;

use fleetboard_health::SweepError;

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

/// GET /api/v1/services
pub async fn snapshot(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    ApiResponse::ok(snapshot)
}

/// POST /api/v1/services/:key/check
pub async fn check_one(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    match state.sweeper.check_one(&key).await {
        Ok(health) => ApiResponse::ok(serde_json::json!({
            "key": key,
            "state": health,
        }))
        .into_response(),
        Err(SweepError::UnknownKey(_)) => {
            error_response("service not found", StatusCode::NOT_FOUND).into_response()
        }
    }
}

/// POST /api/v1/sweep
pub async fn sweep(State(state): State<ApiState>) -> impl IntoResponse {
    info!("sweep triggered via API");
    let results = state.sweeper.check_all().await;

    let body: serde_json::Map<String, serde_json::Value> = results
        .into_iter()
        .map(|(key, health)| (key, serde_json::json!(health)))
        .collect();
    ApiResponse::ok(body)
}

/// GET /healthz
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
