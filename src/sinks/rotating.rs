//! Threshold-driven rotation around any [`RotateTarget`]
//!
//! The sink counts bytes, records and elapsed time since the last rotation and
//! calls [`RotateTarget::rotate`] as soon as any configured limit is reached.
//! It does no locking of its own; it is meant to sit behind a
//! [`Logger`](crate::Logger), which serializes every call.

use crate::core::{Clock, Result, RotateTarget, Sink, SystemClock};
use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 256 MiB
pub const DEFAULT_MAX_BYTES: u64 = 1 << 28;
pub const DEFAULT_MAX_RECORDS: u64 = 1_000_000;
/// 7 days
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 7 * 24 * 60;

/// Raw rotation limits
///
/// Each field is read independently: `0` selects the default, a negative
/// value disables that trigger and a positive value is used as given.
///
/// # Examples
///
/// ```
/// use leveled_logger::sinks::RotationThresholds;
///
/// // 1 MiB files, no record limit, default age limit
/// let thresholds = RotationThresholds::new(1 << 20, -1, 0);
/// assert_eq!(thresholds.max_bytes(), Some(1 << 20));
/// assert_eq!(thresholds.max_records(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationThresholds {
    pub bytes: i64,
    pub records: i64,
    pub minutes: i64,
}

impl RotationThresholds {
    #[must_use]
    pub const fn new(bytes: i64, records: i64, minutes: i64) -> Self {
        Self {
            bytes,
            records,
            minutes,
        }
    }

    /// Every trigger disabled.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(-1, -1, -1)
    }

    pub fn max_bytes(&self) -> Option<u64> {
        resolve(self.bytes, DEFAULT_MAX_BYTES)
    }

    pub fn max_records(&self) -> Option<u64> {
        resolve(self.records, DEFAULT_MAX_RECORDS)
    }

    /// `None` when disabled or too large to represent.
    pub fn max_age(&self) -> Option<TimeDelta> {
        let minutes = match self.minutes {
            0 => DEFAULT_MAX_AGE_MINUTES,
            m if m < 0 => return None,
            m => m,
        };
        TimeDelta::try_minutes(minutes)
    }
}

fn resolve(value: i64, default: u64) -> Option<u64> {
    match value {
        0 => Some(default),
        v if v < 0 => None,
        v => Some(v.unsigned_abs()),
    }
}

/// Sink wrapper that rotates its target on size, record count or age
///
/// A non-empty write is forwarded and counted in bytes. An empty write is the
/// record boundary written by the logger after each record; it is counted as
/// one record and not forwarded.
///
/// # Examples
///
/// ```no_run
/// use leveled_logger::sinks::{FileTarget, RotatingSink, RotationThresholds};
///
/// let target = FileTarget::new("logs/app.log").unwrap();
/// // rotate every 10k records or every hour
/// let sink = RotatingSink::new(target, RotationThresholds::new(-1, 10_000, 60));
/// ```
pub struct RotatingSink<T: RotateTarget> {
    target: T,
    max_bytes: Option<u64>,
    max_records: Option<u64>,
    max_age: Option<TimeDelta>,
    bytes_since_rotation: u64,
    records_since_rotation: u64,
    window_start: DateTime<Local>,
    next_deadline: Option<DateTime<Local>>,
    rotations: u64,
    clock: Arc<dyn Clock>,
}

impl<T: RotateTarget> RotatingSink<T> {
    pub fn new(target: T, thresholds: RotationThresholds) -> Self {
        Self::with_clock(target, thresholds, Arc::new(SystemClock))
    }

    pub fn with_clock(target: T, thresholds: RotationThresholds, clock: Arc<dyn Clock>) -> Self {
        let max_age = thresholds.max_age();
        let now = clock.now();
        Self {
            target,
            max_bytes: thresholds.max_bytes(),
            max_records: thresholds.max_records(),
            max_age,
            bytes_since_rotation: 0,
            records_since_rotation: 0,
            window_start: now,
            next_deadline: max_age.and_then(|age| now.checked_add_signed(age)),
            rotations: 0,
            clock,
        }
    }

    /// Rotate now, regardless of the counters.
    pub fn force_rotate(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.rotate_at(now)
    }

    // counters are reset before the target is asked to rotate, so a failing
    // target does not retrigger on every following write
    fn rotate_at(&mut self, now: DateTime<Local>) -> Result<()> {
        let begin = self.window_start;
        self.bytes_since_rotation = 0;
        self.records_since_rotation = 0;
        self.window_start = now;
        self.next_deadline = self.max_age.and_then(|age| now.checked_add_signed(age));
        self.rotations += 1;
        self.target.rotate(begin, now)
    }

    #[must_use]
    pub fn bytes_since_rotation(&self) -> u64 {
        self.bytes_since_rotation
    }

    #[must_use]
    pub fn records_since_rotation(&self) -> u64 {
        self.records_since_rotation
    }

    #[must_use]
    pub fn window_start(&self) -> DateTime<Local> {
        self.window_start
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Local>> {
        self.next_deadline
    }

    /// Number of rotations triggered since construction.
    #[must_use]
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T: RotateTarget> Sink for RotatingSink<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let mut fire = false;

        let written = if bytes.is_empty() {
            self.records_since_rotation += 1;
            fire |= self
                .max_records
                .is_some_and(|max| self.records_since_rotation >= max);
            Ok(0)
        } else {
            let result = self.target.write(bytes);
            if let Ok(n) = result {
                self.bytes_since_rotation += n as u64;
            }
            fire |= self
                .max_bytes
                .is_some_and(|max| self.bytes_since_rotation >= max);
            result
        };

        let now = (fire || self.max_age.is_some()).then(|| self.clock.now());
        if let (Some(now), Some(deadline)) = (now, self.next_deadline) {
            fire |= now >= deadline;
        }

        let rotated = match now {
            Some(now) if fire => self.rotate_at(now),
            _ => Ok(()),
        };

        // a failed write is reported ahead of a failed rotation
        let n = written?;
        rotated?;
        Ok(n)
    }

    fn flush(&mut self) -> Result<()> {
        self.target.flush()
    }

    fn close(&mut self) -> Result<()> {
        self.target.close()
    }

    fn name(&self) -> &str {
        "rotating"
    }
}
