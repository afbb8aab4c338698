//! Observability for the sales service
//!
//! - Structured JSON event log (`Logger`)
//! - Lock-free counters (`MetricsRegistry`)
//!
//! HTTP request spans are emitted separately through `tracing` by the
//! server's trace layer.
//!
//! ```ignore
//! use penjualan::observability::{Logger, MetricsRegistry};
//!
//! Logger::info("SALES_RECORD_CREATED", &[("id", "1")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_created();
//! ```

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
