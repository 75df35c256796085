//! Lightweight in-process metrics.
//!
//! Counters and a duration histogram kept in `DashMap`s of atomics, rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::GatewayMetrics;
