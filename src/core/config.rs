//! Logger configuration
//!
//! Header layout and behavior switches are plain named booleans. The values
//! are validated once, when a [`Logger`](super::Logger) is built.

use super::error::{LoggerError, Result};
use super::log_level::Level;
use serde::{Deserialize, Serialize};

/// Which fields are generated into each record header
///
/// # Examples
///
/// ```
/// use leveled_logger::core::FormatFlags;
///
/// let flags = FormatFlags::none()
///     .with_time(true)
///     .with_microseconds(true)
///     .with_short_file(true);
/// assert!(flags.includes_file());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatFlags {
    /// `2009-01-23`
    pub date: bool,
    /// `01:23:23`
    pub time: bool,
    /// `01:23:23.123123`, implies `time`
    pub microseconds: bool,
    /// `</a/b/c/d.rs:23>`
    pub long_file: bool,
    /// `<d.rs:23>`
    pub short_file: bool,
}

impl Default for FormatFlags {
    /// Date and time, no location.
    fn default() -> Self {
        Self {
            date: true,
            time: true,
            microseconds: false,
            long_file: false,
            short_file: false,
        }
    }
}

impl FormatFlags {
    /// No generated header fields at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            date: false,
            time: false,
            microseconds: false,
            long_file: false,
            short_file: false,
        }
    }

    #[must_use]
    pub fn with_date(mut self, on: bool) -> Self {
        self.date = on;
        self
    }

    #[must_use]
    pub fn with_time(mut self, on: bool) -> Self {
        self.time = on;
        self
    }

    #[must_use]
    pub fn with_microseconds(mut self, on: bool) -> Self {
        self.microseconds = on;
        self
    }

    #[must_use]
    pub fn with_long_file(mut self, on: bool) -> Self {
        self.long_file = on;
        self
    }

    #[must_use]
    pub fn with_short_file(mut self, on: bool) -> Self {
        self.short_file = on;
        self
    }

    /// Whether the caller location is rendered.
    #[inline]
    pub fn includes_file(&self) -> bool {
        self.long_file || self.short_file
    }

    /// Whether the clock field is rendered.
    #[inline]
    pub fn includes_clock(&self) -> bool {
        self.time || self.microseconds
    }
}

/// Behavior switches of a logger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFlags {
    /// Emit only records whose level equals the threshold.
    pub equal_level_only: bool,
    /// Leave the `[I]`-style tag out of the header.
    pub suppress_level_tag: bool,
    /// Skip the empty record-boundary write after each record.
    pub suppress_record_sentinel: bool,
    /// Fatal records do not terminate the process.
    pub suppress_exit_on_fatal: bool,
    /// Panic records do not raise a panic.
    pub suppress_panic_on_panic: bool,
    /// Discard sink errors and panics instead of reporting them.
    pub recover_on_write_failure: bool,
}

impl ModeFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_equal_level_only(mut self, on: bool) -> Self {
        self.equal_level_only = on;
        self
    }

    #[must_use]
    pub fn with_suppress_level_tag(mut self, on: bool) -> Self {
        self.suppress_level_tag = on;
        self
    }

    #[must_use]
    pub fn with_suppress_record_sentinel(mut self, on: bool) -> Self {
        self.suppress_record_sentinel = on;
        self
    }

    #[must_use]
    pub fn with_suppress_exit_on_fatal(mut self, on: bool) -> Self {
        self.suppress_exit_on_fatal = on;
        self
    }

    #[must_use]
    pub fn with_suppress_panic_on_panic(mut self, on: bool) -> Self {
        self.suppress_panic_on_panic = on;
        self
    }

    #[must_use]
    pub fn with_recover_on_write_failure(mut self, on: bool) -> Self {
        self.recover_on_write_failure = on;
        self
    }
}

/// Everything about a logger except its sink
///
/// The struct deserializes with every field optional, so an application can
/// keep it in whatever configuration format it already uses.
///
/// # Examples
///
/// ```
/// use leveled_logger::core::{Level, LoggerConfig};
///
/// let config = LoggerConfig {
///     prefix: "api".to_string(),
///     threshold: Level::Info,
///     ..LoggerConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub prefix: String,
    pub format: FormatFlags,
    pub modes: ModeFlags,
    pub threshold: Level,
    pub print_level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            format: FormatFlags::default(),
            modes: ModeFlags::default(),
            threshold: Level::MOST_VERBOSE,
            print_level: Level::Always,
        }
    }
}

impl LoggerConfig {
    /// Reject combinations that have no single meaning.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] when the threshold is
    /// [`Level::Always`] or when both file location forms are requested.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_severity() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "threshold must be one of the eight severities, not ALWAYS",
            ));
        }
        if self.format.long_file && self.format.short_file {
            return Err(LoggerError::config(
                "FormatFlags",
                "long_file and short_file are mutually exclusive",
            ));
        }
        Ok(())
    }
}
