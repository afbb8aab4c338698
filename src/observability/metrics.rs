//! Request and store counters
//!
//! - Counters only increase
//! - Reset only on process start
//! - Atomic, lock-free increments

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the sales service.
///
/// Relaxed ordering is enough: counters are independent and only read for
/// reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    records_created: AtomicU64,
    records_replaced: AtomicU64,
    records_patched: AtomicU64,
    records_deleted: AtomicU64,
    store_clears: AtomicU64,
    access_denied: AtomicU64,
    validation_failures: AtomicU64,
    not_found: AtomicU64,
}

/// Point-in-time copy of every counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub records_replaced: u64,
    pub records_patched: u64,
    pub records_deleted: u64,
    pub store_clears: u64,
    pub access_denied: u64,
    pub validation_failures: u64,
    pub not_found: u64,
    /// Records currently held by the store
    pub records: u64,
}

impl MetricsRegistry {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_replaced(&self) {
        self.records_replaced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_patched(&self) {
        self.records_patched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_clears(&self) {
        self.store_clears.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_access_denied(&self) {
        self.access_denied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot; `records` comes from the store, not from counters.
    pub fn snapshot(&self, records: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_replaced: self.records_replaced.load(Ordering::Relaxed),
            records_patched: self.records_patched.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            store_clears: self.store_clears.load(Ordering::Relaxed),
            access_denied: self.access_denied.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            records: records as u64,
        }
    }
}
