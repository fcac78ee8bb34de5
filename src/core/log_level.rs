//! Log level definitions
//!
//! Levels are ordered most severe first, so `a < b` means "a is more severe
//! than b". [`Level::Always`] sorts before every severity and is never filtered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Always = 0,
    Fatal = 1,
    Panic = 2,
    Alert = 3,
    Error = 4,
    Report = 5,
    Notify = 6,
    Info = 7,
    Debug = 8,
}

/// Header abbreviations, indexed by `Level as usize`.
const TAGS: [&str; 9] = ["[Z]", "[F]", "[P]", "[A]", "[E]", "[R]", "[N]", "[I]", "[D]"];

const NAMES: [&str; 9] = [
    "ALWAYS", "FATAL", "PANIC", "ALERT", "ERROR", "REPORT", "NOTIFY", "INFO", "DEBUG",
];

impl Level {
    /// The eight filterable severities, most severe first.
    pub const SEVERITIES: [Level; 8] = [
        Level::Fatal,
        Level::Panic,
        Level::Alert,
        Level::Error,
        Level::Report,
        Level::Notify,
        Level::Info,
        Level::Debug,
    ];

    /// The most verbose severity; the default threshold.
    pub const MOST_VERBOSE: Level = Level::Debug;

    /// Abbreviated tag written into record headers, e.g. `[I]`.
    #[inline]
    pub const fn tag(self) -> &'static str {
        TAGS[self as usize]
    }

    #[inline]
    pub const fn to_str(self) -> &'static str {
        NAMES[self as usize]
    }

    /// True for the eight real severities, false for [`Level::Always`].
    #[inline]
    pub const fn is_severity(self) -> bool {
        !matches!(self, Level::Always)
    }

    /// Whether a record at `self` is at least as severe as `threshold`.
    #[inline]
    pub fn passes(self, threshold: Level) -> bool {
        self <= threshold
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::MOST_VERBOSE
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALWAYS" => Ok(Level::Always),
            "FATAL" => Ok(Level::Fatal),
            "PANIC" => Ok(Level::Panic),
            "ALERT" => Ok(Level::Alert),
            "ERROR" => Ok(Level::Error),
            "REPORT" => Ok(Level::Report),
            "NOTIFY" => Ok(Level::Notify),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<&str> for Level {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        s.parse()
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(Level::Always),
            1..=8 => Ok(Level::SEVERITIES[usize::from(value) - 1]),
            _ => Err(format!("Invalid log level index: {}", value)),
        }
    }
}
