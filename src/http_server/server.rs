//! # HTTP Server
//!
//! Combines the sales and observability routers behind the access guard.
//!
//! Layer order, outermost first: request tracing, CORS, access guard. CORS
//! preflight requests are answered before the guard sees them.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, middleware, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::auth::CredentialVerifier;
use crate::observability::{Logger, MetricsRegistry};

use super::config::{parse_origin, HttpServerConfig};
use super::guard::{require_credentials, AccessGuard};
use super::observability_routes::observability_routes;
use super::sales_routes::{sales_routes, SalesState};

/// HTTP server for the sales service
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<SalesState>,
    router: Router,
}

impl HttpServer {
    /// Create a server with a fresh, empty store
    pub fn new(config: HttpServerConfig, verifier: Arc<dyn CredentialVerifier>) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let state = Arc::new(SalesState::new(metrics));
        Self::with_state(config, verifier, state)
    }

    /// Create a server around an existing state
    pub fn with_state(
        config: HttpServerConfig,
        verifier: Arc<dyn CredentialVerifier>,
        state: Arc<SalesState>,
    ) -> Self {
        let router = Self::build_router(&config, verifier, Arc::clone(&state));
        Self {
            config,
            state,
            router,
        }
    }

    fn build_router(
        config: &HttpServerConfig,
        verifier: Arc<dyn CredentialVerifier>,
        state: Arc<SalesState>,
    ) -> Router {
        let guard = Arc::new(AccessGuard::new(verifier, Arc::clone(&state.metrics)));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // Config::validate rejects bad origins; any that reach here are logged
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|origin| match parse_origin(origin) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        Logger::warn("CORS_ORIGIN_IGNORED", &[("reason", e.as_str())]);
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(sales_routes(Arc::clone(&state)))
            .merge(observability_routes(state))
            .fallback(route_not_found)
            .layer(middleware::from_fn_with_state(guard, require_credentials))
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared state behind the routes
    pub fn state(&self) -> Arc<SalesState> {
        Arc::clone(&self.state)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        Logger::info("SERVER_STARTING", &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info("SERVER_STOPPED", &[("addr", bound.as_str())]);
        Ok(())
    }
}

async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "route not found" })),
    )
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the listener fails
        std::future::pending::<()>().await;
    }
}
