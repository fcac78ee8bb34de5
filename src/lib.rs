//! # Leveled Logger
//!
//! A synchronous leveled logger with configurable record headers, pluggable
//! sinks and threshold-driven file rotation.
//!
//! ## Features
//!
//! - **Severity gate**: eight ordered levels, from `Fatal` down to `Debug`,
//!   with an optional exact-match mode
//! - **One line per record**: messages are quoted so embedded newlines cannot
//!   split a record
//! - **Rotation**: by size, record count or age, whichever comes first
//! - **Fan-out**: [`MultiLogger`] sends one call to several loggers
//!
//! ```
//! use leveled_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .prefix("db")
//!     .format(FormatFlags::none())
//!     .sink(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! leveled_logger::info!(logger, "{} rows", 42);
//! assert_eq!(sink.contents(), "db [I] \"42 rows\"\n");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ActionHandler, Clock, FormatFlags, Level, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, ManualClock, ModeFlags, MultiLogger, PostLogAction,
        ProcessActionHandler, Result, RotateTarget, Sink, SystemClock,
    };
    pub use crate::sinks::{
        ConsoleSink, FileTarget, MemorySink, RotatingSink, RotationThresholds, WriterSink,
    };
}

pub use crate::core::{
    ActionHandler, Clock, FormatFlags, Level, LogEntry, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, ManualClock, ModeFlags, MultiLogger, PostLogAction,
    ProcessActionHandler, Result, RotateTarget, Sink, SystemClock,
};
pub use sinks::{
    ConsoleSink, ConsoleStream, FileTarget, MemorySink, RotatingSink, RotationThresholds,
    WriterSink,
};
