//! Clock and timestamp rendering
//!
//! Every component that reads the time does so through a [`Clock`], so tests
//! can freeze or step time deterministically.

use chrono::{DateTime, Local, TimeDelta};
use parking_lot::Mutex;
use std::fmt::Write as _;

/// Source of wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The real local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to
///
/// # Examples
///
/// ```
/// use leveled_logger::core::{Clock, ManualClock};
/// use chrono::TimeDelta;
///
/// let clock = ManualClock::new(chrono::Local::now());
/// let before = clock.now();
/// clock.advance(TimeDelta::minutes(5));
/// assert_eq!(clock.now() - before, TimeDelta::minutes(5));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock()
    }
}

/// Append `YYYY-MM-DD`.
pub fn push_date(buf: &mut String, at: &DateTime<Local>) {
    let _ = write!(buf, "{}", at.format("%Y-%m-%d"));
}

/// Append `HH:MM:SS`, or `HH:MM:SS.uuuuuu` when `micros` is set.
pub fn push_clock(buf: &mut String, at: &DateTime<Local>, micros: bool) {
    let _ = write!(buf, "{}", at.format("%H:%M:%S"));
    if micros {
        // leap seconds report 1_000_000+ micros
        let us = at.timestamp_subsec_micros().min(999_999);
        let _ = write!(buf, ".{:06}", us);
    }
}

/// Render the rotation file stamp `YYYYMMDDHHMMSS.fffff`.
///
/// The fraction is truncated to five digits (10µs resolution).
pub fn file_stamp(at: &DateTime<Local>) -> String {
    let fraction = (at.timestamp_subsec_nanos() / 10_000).min(99_999);
    format!("{}.{:05}", at.format("%Y%m%d%H%M%S"), fraction)
}
