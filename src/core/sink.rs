//! Sink traits for log output destinations

use super::error::Result;
use chrono::{DateTime, Local};

/// A byte destination for formatted records
///
/// The logger writes each record as one formatted line followed, unless
/// disabled, by an empty write that marks the record boundary. Sinks that
/// do not count records can treat the empty write as a no-op.
pub trait Sink: Send {
    fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release the underlying resource. Writes after `close` may fail.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// A sink that can switch to a fresh destination
///
/// `begin` is the start of the window being closed and `now` the instant the
/// rotation was triggered.
pub trait RotateTarget: Sink {
    fn rotate(&mut self, begin: DateTime<Local>, now: DateTime<Local>) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: RotateTarget + ?Sized> RotateTarget for Box<T> {
    fn rotate(&mut self, begin: DateTime<Local>, now: DateTime<Local>) -> Result<()> {
        (**self).rotate(begin, now)
    }
}
