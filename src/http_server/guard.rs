//! Access guard middleware
//!
//! Runs before every route, including health, metrics and the fallback.
//! A denied request never reaches a handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::CredentialVerifier;
use crate::observability::{Logger, MetricsRegistry};

/// State for the access guard layer
pub struct AccessGuard {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AccessGuard {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { verifier, metrics }
    }
}

/// Rejects the request with 401 unless the verifier allows it
pub async fn require_credentials(
    State(guard): State<Arc<AccessGuard>>,
    request: Request,
    next: Next,
) -> Response {
    match guard.verifier.verify(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            guard.metrics.increment_access_denied();
            Logger::warn(
                "ACCESS_DENIED",
                &[
                    ("method", request.method().as_str()),
                    ("path", request.uri().path()),
                    ("reason", e.reason()),
                ],
            );

            let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);
            (status, Json(json!({ "message": e.to_string() }))).into_response()
        }
    }
}
