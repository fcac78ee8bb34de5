//! Logger metrics for observability
//!
//! Counts records that reached the sink and writes that failed. Calls that
//! are filtered out by the level gate are not counted.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_failure();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records fully written to the sink
    records_written: AtomicU64,

    /// Writes whose error was returned to the caller
    write_failures: AtomicU64,

    /// Writes whose error or panic was discarded by recover mode
    recovered_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            recovered_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn recovered_failures(&self) -> u64 {
        self.recovered_failures.load(Ordering::Relaxed)
    }

    /// Record a successfully written record
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failure that was reported to the caller
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failure swallowed by recover mode
    #[inline]
    pub fn record_recovered(&self) -> u64 {
        self.recovered_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of attempted records that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been attempted.
    pub fn failure_rate(&self) -> f64 {
        let failed = (self.write_failures() + self.recovered_failures()) as f64;
        let total = self.records_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.recovered_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_written: AtomicU64::new(self.records_written()),
            write_failures: AtomicU64::new(self.write_failures()),
            recovered_failures: AtomicU64::new(self.recovered_failures()),
        }
    }
}
