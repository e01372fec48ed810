//! Service counters for delayline
//!
//! Lock-free atomic counters behind an `Arc`, shared between the HTTP
//! handlers and the `/metrics` endpoint. Counts only increase for the
//! lifetime of the process; there is no reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Registry of service counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Dataset loads that produced a usable table
    datasets_loaded: AtomicU64,
    /// Dataset loads that failed (missing file, bad header, strict parse)
    load_failures: AtomicU64,
    /// Queries answered with a result payload
    queries_executed: AtomicU64,
    /// Queries refused before execution (bad column, date, or paging)
    queries_rejected: AtomicU64,
    /// Queries that matched no rows
    empty_results: AtomicU64,
    /// Users accepted into the user store
    users_added: AtomicU64,
    /// User submissions refused (malformed body or failed validation)
    users_rejected: AtomicU64,
    /// Users removed by delete_all
    users_removed: AtomicU64,
}

/// Point-in-time view of every counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub datasets_loaded: u64,
    pub load_failures: u64,
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub empty_results: u64,
    pub users_added: u64,
    pub users_rejected: u64,
    pub users_removed: u64,
}

impl MetricsRegistry {
    /// Creates a shared registry with all counters at zero
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_dataset_loaded(&self) {
        self.datasets_loaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_result(&self) {
        self.empty_results.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_user_added(&self) {
        self.users_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_user_rejected(&self) {
        self.users_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_users_removed(&self, count: u64) {
        self.users_removed.fetch_add(count, Ordering::Relaxed);
    }

    /// Captures the current value of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            datasets_loaded: self.datasets_loaded.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
            users_added: self.users_added.load(Ordering::Relaxed),
            users_rejected: self.users_rejected.load(Ordering::Relaxed),
            users_removed: self.users_removed.load(Ordering::Relaxed),
        }
    }

    /// Renders the counters as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let snapshot = self.snapshot();
        serde_json::json!({
            "datasets_loaded": snapshot.datasets_loaded,
            "load_failures": snapshot.load_failures,
            "queries_executed": snapshot.queries_executed,
            "queries_rejected": snapshot.queries_rejected,
            "empty_results": snapshot.empty_results,
            "users_added": snapshot.users_added,
            "users_rejected": snapshot.users_rejected,
            "users_removed": snapshot.users_removed,
        })
    }
}
