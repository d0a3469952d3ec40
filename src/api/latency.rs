//! Prediction latency histogram, recorded around each orchestrator run.

use std::sync::Mutex;
use std::time::Duration;

/// Microsecond histogram shared by handlers.
pub struct PredictionLatency {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

impl PredictionLatency {
    /// Tracks 1us to 60s, 3 significant figures.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 60_000_000, 3)
            .expect("valid histogram bounds");
        Self {
            inner: Mutex::new(histogram),
        }
    }

    pub fn record(&self, elapsed: Duration) {
        let us = elapsed.as_micros().clamp(1, 60_000_000) as u64;
        if let Ok(mut h) = self.inner.lock() {
            let _ = h.record(us);
        }
    }

    /// (p50, p95, p99) in microseconds; all `None` before the first sample.
    pub fn percentiles(&self) -> (Option<u64>, Option<u64>, Option<u64>) {
        let Ok(h) = self.inner.lock() else {
            return (None, None, None);
        };
        if h.len() == 0 {
            return (None, None, None);
        }
        (
            Some(h.value_at_quantile(0.5)),
            Some(h.value_at_quantile(0.95)),
            Some(h.value_at_quantile(0.99)),
        )
    }
}

impl Default for PredictionLatency {
    fn default() -> Self {
        Self::new()
    }
}
