//! penjualan - an in-memory sales record service over HTTP
//!
//! - `sales`: record table and payload validation
//! - `auth`: shared-secret access guard
//! - `http_server`: axum routes, guard layer and server
//! - `observability`: JSON event log and counters
//! - `cli`: command line and configuration

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod sales;
