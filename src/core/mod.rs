//! Core logger types and traits

pub mod action;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod multi;
pub mod sink;
pub mod timestamp;

pub use action::{ActionHandler, PostLogAction, ProcessActionHandler};
pub use config::{FormatFlags, LoggerConfig, ModeFlags};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use multi::MultiLogger;
pub use sink::{RotateTarget, Sink};
pub use timestamp::{Clock, ManualClock, SystemClock};
