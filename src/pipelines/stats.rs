use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

// ============ Request metrics (process-wide, owned by the composition root) ============

/// Increment-only request counters shared by all handlers.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    analysis_duration_ms: AtomicU64,
}

impl ServiceMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request on any endpoint.
    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a request and start timing its analysis. Call
    /// [`finish`](AnalysisTimer::finish) once the analysis succeeded.
    pub fn start_analysis(&self) -> AnalysisTimer<'_> {
        self.record_request();
        AnalysisTimer {
            metrics: self,
            start_time: Instant::now(),
        }
    }

    /// Record a completed analysis and its duration.
    pub fn record_success(&self, duration: Duration) {
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.analysis_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get a snapshot of current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            analysis_duration_ms: self.analysis_duration_ms.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ServiceMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Requests received on any endpoint.
    pub total_requests: u64,
    /// Analysis requests that produced a response.
    pub successful_requests: u64,
    /// Cumulative analysis time in milliseconds.
    pub analysis_duration_ms: u64,
}

impl MetricsSnapshot {
    /// Average analysis time in milliseconds.
    pub fn avg_analysis_ms(&self) -> f64 {
        if self.successful_requests == 0 {
            0.0
        } else {
            self.analysis_duration_ms as f64 / self.successful_requests as f64
        }
    }
}

/// Tracks timing from creation to [`finish`](Self::finish).
///
/// Dropping the timer without finishing leaves the request counted but not successful.
#[must_use = "call finish() to record a successful analysis"]
pub struct AnalysisTimer<'a> {
    metrics: &'a ServiceMetrics,
    start_time: Instant,
}

impl AnalysisTimer<'_> {
    /// Record the analysis as successful and return its duration.
    pub fn finish(self) -> Duration {
        let elapsed = self.start_time.elapsed();
        self.metrics.record_success(elapsed);
        elapsed
    }
}
