//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::api::state::AppState;
use crate::domain::{HealthResponse, ReadyComponents, ReadyResponse};

/// Liveness probe - always healthy while the process is serving.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness probe - checks if the ticket store can serve requests.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let storage_ok = state.storage.health_check().await.is_ok();
    let active_tickets = state.parking_service.active_tickets().await.ok();

    let status_code = if storage_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(ReadyResponse {
        ready: storage_ok,
        active_tickets,
        components: ReadyComponents {
            storage: storage_ok,
        },
    });

    (status_code, response)
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.as_ref().map_or_else(
        || {
            let mut output = String::new();
            output.push_str("# HELP parking_up Whether the service is up\n");
            output.push_str("# TYPE parking_up gauge\n");
            output.push_str("parking_up 1\n");
            output
        },
        PrometheusHandle::render,
    )
}
