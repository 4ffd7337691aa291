//! Forwarding metrics for observability
//!
//! Counters describing what happened to the log calls a tree accepted.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a forwarding tree
///
/// # Example
///
/// ```
/// use loggly_tree::ForwardingMetrics;
///
/// let metrics = ForwardingMetrics::new();
///
/// metrics.record_submitted();
/// metrics.record_failed();
///
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.failed(), 1);
/// ```
#[derive(Debug)]
pub struct ForwardingMetrics {
    /// Payloads handed to the transport
    submitted: AtomicU64,

    /// Submissions the transport reported as delivered
    delivered: AtomicU64,

    /// Submissions the transport reported as failed
    failed: AtomicU64,

    /// Calls rejected before submission because the template was malformed
    format_errors: AtomicU64,
}

impl ForwardingMetrics {
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            format_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn format_errors(&self) -> u64 {
        self.format_errors.load(Ordering::Relaxed)
    }

    /// Submissions still waiting for a result
    pub fn in_flight(&self) -> u64 {
        self.submitted()
            .saturating_sub(self.delivered() + self.failed())
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_format_error(&self) -> u64 {
        self.format_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate as a percentage (0.0 - 100.0) of completed submissions
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.format_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for ForwardingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ForwardingMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            delivered: AtomicU64::new(self.delivered()),
            failed: AtomicU64::new(self.failed()),
            format_errors: AtomicU64::new(self.format_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = ForwardingMetrics::new();
        assert_eq!(metrics.submitted(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.failed(), 0);
        assert_eq!(metrics.format_errors(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = ForwardingMetrics::new();
        assert_eq!(metrics.record_submitted(), 0);
        assert_eq!(metrics.record_submitted(), 1);
        assert_eq!(metrics.submitted(), 2);
    }

    #[test]
    fn test_in_flight() {
        let metrics = ForwardingMetrics::new();
        for _ in 0..3 {
            metrics.record_submitted();
        }
        metrics.record_delivered();
        metrics.record_failed();
        assert_eq!(metrics.in_flight(), 1);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = ForwardingMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..3 {
            metrics.record_delivered();
        }
        metrics.record_failed();
        assert_eq!(metrics.failure_rate(), 25.0);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = ForwardingMetrics::new();
        metrics.record_submitted();
        metrics.record_format_error();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.submitted(), 0);
        assert_eq!(metrics.format_errors(), 0);
        assert_eq!(snapshot.submitted(), 1);
        assert_eq!(snapshot.format_errors(), 1);
    }
}
