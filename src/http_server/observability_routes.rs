//! Observability HTTP Routes
//!
//! Health check and counter snapshot. Both sit behind the access guard like
//! every other route.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::observability::MetricsSnapshot;

use super::sales_routes::SalesState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create observability routes
pub fn observability_routes(state: Arc<SalesState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(
    State(state): State<Arc<SalesState>>,
) -> Result<Json<MetricsSnapshot>, (StatusCode, Json<Value>)> {
    let records = state.store.len().map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "internal server error" })),
        )
    })?;

    Ok(Json(state.metrics.snapshot(records)))
}
