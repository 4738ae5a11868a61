//! Recommendation metrics and timing
//!
//! Counters go through the `metrics` facade; without an installed recorder
//! they are no-ops.

use std::time::Instant;

use super::decider::DecisionPath;

/// Performance timer for tracking operation duration
pub struct PerformanceTimer {
    start: Instant,
    label: &'static str,
}

impl PerformanceTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            start: Instant::now(),
            label,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn log_if_slow(&self, threshold_ms: u64) {
        let elapsed = self.elapsed_ms();
        if elapsed > threshold_ms {
            tracing::warn!(
                "⚠️ Slow operation: {} took {}ms (threshold: {}ms)",
                self.label,
                elapsed,
                threshold_ms
            );
        }
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        tracing::debug!("⏱️ {} completed in {}ms", self.label, elapsed);
    }
}

/// Count one recommendation served through `path`
pub fn record_decision(path: DecisionPath) {
    ::metrics::counter!("recommendations_total", "path" => path.as_str()).increment(1);
}
