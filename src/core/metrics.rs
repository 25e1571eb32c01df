//! Delivery metrics for observability
//!
//! The fan-out path never reports destination failures to the caller, so
//! these counters are the place to watch destination health.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for fan-out delivery
///
/// # Example
///
/// ```
/// use fanout_log::DeliveryMetrics;
///
/// let metrics = DeliveryMetrics::new();
/// metrics.record_write();
/// metrics.record_delivered();
/// metrics.record_failed();
///
/// assert_eq!(metrics.writes(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct DeliveryMetrics {
    /// Fan-out write calls
    writes: AtomicU64,

    /// Per-destination deliveries that succeeded
    delivered: AtomicU64,

    /// Per-destination deliveries that returned an error
    failed: AtomicU64,

    /// Per-destination deliveries that panicked
    panicked: AtomicU64,

    /// Per-destination deliveries still running when the write deadline hit
    timed_out: AtomicU64,
}

impl DeliveryMetrics {
    pub const fn new() -> Self {
        Self {
            writes: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            panicked: AtomicU64::new(0),
            timed_out: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
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
    pub fn panicked(&self) -> u64 {
        self.panicked.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn timed_out(&self) -> u64 {
        self.timed_out.load(Ordering::Relaxed)
    }

    /// Failures of any kind: errors, panics and timeouts
    pub fn undelivered(&self) -> u64 {
        self.failed() + self.panicked() + self.timed_out()
    }

    #[inline]
    pub fn record_write(&self) -> u64 {
        self.writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed delivery, returning the previous failure total
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_panicked(&self) -> u64 {
        self.panicked.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_timed_out(&self) -> u64 {
        self.timed_out.fetch_add(1, Ordering::Relaxed)
    }

    /// Undelivered share of all per-destination attempts (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let undelivered = self.undelivered() as f64;
        let total = self.delivered() as f64 + undelivered;
        if total == 0.0 {
            0.0
        } else {
            (undelivered / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.writes.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.panicked.store(0, Ordering::Relaxed);
        self.timed_out.store(0, Ordering::Relaxed);
    }
}

impl Default for DeliveryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DeliveryMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            writes: AtomicU64::new(self.writes()),
            delivered: AtomicU64::new(self.delivered()),
            failed: AtomicU64::new(self.failed()),
            panicked: AtomicU64::new(self.panicked()),
            timed_out: AtomicU64::new(self.timed_out()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = DeliveryMetrics::new();
        assert_eq!(metrics.writes(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.undelivered(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = DeliveryMetrics::new();
        assert_eq!(metrics.record_failed(), 0);
        assert_eq!(metrics.record_failed(), 1);
        assert_eq!(metrics.failed(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = DeliveryMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        metrics.record_failed();
        metrics.record_panicked();
        for _ in 0..8 {
            metrics.record_timed_out();
        }

        let rate = metrics.failure_rate();
        assert!((rate - 10.0).abs() < f64::EPSILON, "rate was {}", rate);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let metrics = DeliveryMetrics::new();
        metrics.record_write();

        let snapshot = metrics.clone();
        metrics.record_write();

        assert_eq!(snapshot.writes(), 1);
        assert_eq!(metrics.writes(), 2);

        metrics.reset();
        assert_eq!(metrics.writes(), 0);
    }
}
