//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::future::Future;
use std::time::Duration;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Upper bound on each dependency probe.
const CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "Reachable" },
///     "click_queue": { "status": "ok", "message": "Capacity: 10000/10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, cache) = tokio::join!(check_database(&state), check_cache(&state));
    let click_queue = check_click_queue(&state);

    let all_healthy = database.is_ok() && cache.is_ok() && click_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            cache,
            click_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn probe(check: impl Future<Output = bool>) -> Option<bool> {
    tokio::time::timeout(CHECK_TIMEOUT, check).await.ok()
}

async fn check_database(state: &AppState) -> CheckStatus {
    match probe(state.link_repository.health_check()).await {
        Some(true) => CheckStatus::ok("Connected"),
        Some(false) => CheckStatus::error("Database query failed"),
        None => CheckStatus::error("Database check timed out"),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    match probe(state.cache.health_check()).await {
        Some(true) => CheckStatus::ok("Reachable"),
        Some(false) => CheckStatus::error("Cache connection failed"),
        None => CheckStatus::error("Cache check timed out"),
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    let sender = &state.click_sender;

    if sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Capacity: {}/{}",
            sender.capacity(),
            sender.max_capacity()
        ))
    }
}
