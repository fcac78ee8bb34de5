//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes a logger expression followed by `format!`-style
//! arguments. The arguments are passed as [`format_args!`], so nothing is
//! formatted when the record is filtered out. The caller location recorded for
//! file headers is the macro call site.
//!
//! The macros work with both [`Logger`](crate::Logger) and
//! [`MultiLogger`](crate::MultiLogger).
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{info, notify};
//!
//! let logger = Logger::new(MemorySink::new(), "svc");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! notify!(logger, "Server listening on port {}", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "");
/// use leveled_logger::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

/// Log a fatal message. The process exits afterwards unless the logger
/// suppresses it.
///
/// ```
/// # use leveled_logger::prelude::*;
/// let logger = Logger::builder()
///     .modes(ModeFlags::new().with_suppress_exit_on_fatal(true))
///     .sink(MemorySink::new())
///     .build()
///     .unwrap();
/// leveled_logger::fatal!(logger, "config missing: {}", "db.url");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format_args!($($arg)+))
    };
}

/// Log a panic-level message, then panic unless the logger suppresses it.
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $logger.alert(format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "");
/// use leveled_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "HTTP error: {} - {}", 404, "Not Found");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! report {
    ($logger:expr, $($arg:tt)+) => {
        $logger.report(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! notify {
    ($logger:expr, $($arg:tt)+) => {
        $logger.notify(format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::new(MemorySink::new(), "");
/// use leveled_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

/// Log without a severity; tagged with the logger's print level.
#[macro_export]
macro_rules! log_print {
    ($logger:expr, $($arg:tt)+) => {
        $logger.print(format_args!($($arg)+))
    };
}
