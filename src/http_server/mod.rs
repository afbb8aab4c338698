//! # HTTP Server Module
//!
//! Axum server for the sales service.
//!
//! # Endpoints
//!
//! - `/penjualan`, `/penjualan/:id` - Sales record CRUD
//! - `/health` - Health check
//! - `/metrics` - Counter snapshot
//!
//! Every endpoint requires the configured credential header.

pub mod config;
pub mod guard;
pub mod observability_routes;
pub mod sales_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use sales_routes::SalesState;
pub use server::HttpServer;
