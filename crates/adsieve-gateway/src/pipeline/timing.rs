//! Timing decorator. Keeps clocks and histograms out of the transform itself.

use std::time::Instant;

use crate::obs::GatewayMetrics;

/// Run `f`, log its duration at debug level and record it under `op`.
pub fn timed<T>(op: &'static str, metrics: Option<&GatewayMetrics>, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();

    tracing::debug!(op, elapsed_us = elapsed.as_micros() as u64, "{op} completed");
    if let Some(m) = metrics {
        m.op_duration.observe(&[("op", op)], elapsed);
    }
    out
}
