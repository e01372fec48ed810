//! Observability subsystem for delayline
//!
//! Structured one-line JSON logging plus a registry of monotonic
//! service counters. Logging never fails the operation being logged,
//! and neither piece spawns threads or buffers output.
//!
//! # Usage
//!
//! ```ignore
//! use delayline::observability::{Logger, MetricsRegistry};
//!
//! Logger::info("QUERY_EXECUTED", &[("column", "reason"), ("rows", "2")]);
//!
//! let metrics = MetricsRegistry::shared();
//! metrics.record_query_executed();
//! ```

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
