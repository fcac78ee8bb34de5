//! The leveled logger
//!
//! A [`Logger`] gates each call by severity, renders one header line per
//! record and writes it to its sink while holding the logger's lock. The line
//! is followed by an empty write that marks the record boundary, which a
//! [`RotatingSink`] counts as one record.

use super::action::{ActionHandler, PostLogAction, ProcessActionHandler};
use super::config::{FormatFlags, LoggerConfig, ModeFlags};
use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::Level;
use super::metrics::LoggerMetrics;
use super::sink::{RotateTarget, Sink};
use super::timestamp::{Clock, SystemClock};
use crate::sinks::{RotatingSink, RotationThresholds, WriterSink};
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;

struct LoggerState {
    sink: Box<dyn Sink>,
    print_level: Level,
    buf: String,
}

/// Leveled, synchronous logger bound to one sink
///
/// All writes, including rotation of a rotating sink, happen on the calling
/// thread while the logger's lock is held.
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .prefix("api")
///     .format(FormatFlags::none())
///     .threshold(Level::Notify)
///     .sink(sink.clone())
///     .build()
///     .unwrap();
///
/// logger.info("filtered out");
/// logger.alert("disk almost full");
/// assert_eq!(sink.contents(), "api [A] \"disk almost full\"\n");
/// ```
pub struct Logger {
    prefix: String,
    format: FormatFlags,
    modes: ModeFlags,
    threshold: Level,
    state: Mutex<LoggerState>,
    clock: Arc<dyn Clock>,
    actions: Arc<dyn ActionHandler>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with default settings: date and time headers, every severity
    /// emitted, fatal exits and panic panics.
    pub fn new<S: Sink + 'static>(sink: S, prefix: impl Into<String>) -> Self {
        let config = LoggerConfig {
            prefix: prefix.into(),
            ..LoggerConfig::default()
        };
        Self::from_parts(
            config,
            Box::new(sink),
            Arc::new(SystemClock),
            Arc::new(ProcessActionHandler),
        )
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_parts(
        config: LoggerConfig,
        sink: Box<dyn Sink>,
        clock: Arc<dyn Clock>,
        actions: Arc<dyn ActionHandler>,
    ) -> Self {
        Self {
            prefix: config.prefix,
            format: config.format,
            modes: config.modes,
            threshold: config.threshold,
            state: Mutex::new(LoggerState {
                sink,
                print_level: config.print_level,
                buf: String::with_capacity(256),
            }),
            clock,
            actions,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Whether a record at `level` passes the gate.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        if level == Level::Always {
            return true;
        }
        if self.modes.equal_level_only {
            level == self.threshold
        } else {
            level.passes(self.threshold)
        }
    }

    /// Gate, format and write one record
    ///
    /// `level` defaults to [`Level::Always`], which bypasses the gate and is
    /// tagged `[Z]`. `caller` is rendered when a file flag is set.
    ///
    /// # Errors
    ///
    /// Returns the sink's error, unless the logger recovers from write
    /// failures, in which case errors and sink panics are discarded.
    pub fn output(
        &self,
        caller: &'static Location<'static>,
        message: &str,
        level: Option<Level>,
    ) -> Result<()> {
        self.emit(caller, message, level.unwrap_or(Level::Always), false)
    }

    // With `print_tag`, an `Always` record is tagged with the print level.
    pub(crate) fn emit(
        &self,
        caller: &'static Location<'static>,
        message: &str,
        level: Level,
        print_tag: bool,
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let mut entry = LogEntry::new(level, message, self.clock.now());
        if self.format.includes_file() {
            entry = entry.with_location(caller);
        }

        let mut guard = self.state.lock();
        let LoggerState {
            sink,
            print_level,
            buf,
        } = &mut *guard;

        let tag_level = if print_tag && level == Level::Always {
            *print_level
        } else {
            level
        };
        let tag = (!self.modes.suppress_level_tag).then_some(tag_level);

        buf.clear();
        entry.write_line(buf, &self.prefix, &self.format, tag);

        let sentinel = !self.modes.suppress_record_sentinel;
        self.guard_sink((), || {
            sink.write(buf.as_bytes())?;
            if sentinel {
                sink.write(&[])?;
            }
            self.metrics.record_written();
            Ok(())
        })
    }

    // Runs `op` with the sink borrowed. In recover mode errors and panics are
    // swallowed and `fallback` is returned instead.
    fn guard_sink<T>(&self, fallback: T, op: impl FnOnce() -> Result<T>) -> Result<T> {
        if !self.modes.recover_on_write_failure {
            let result = op();
            if result.is_err() {
                self.metrics.record_failure();
            }
            return result;
        }

        match panic::catch_unwind(AssertUnwindSafe(op)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) | Err(_) => {
                self.metrics.record_recovered();
                Ok(fallback)
            }
        }
    }

    fn log_at(&self, caller: &'static Location<'static>, level: Level, message: impl fmt::Display) {
        let action = PostLogAction::resolve(level, &self.modes);
        if action == PostLogAction::None && !self.enabled(level) {
            return;
        }

        let text = message.to_string();
        if let Err(err) = self.emit(caller, &text, level, true) {
            eprintln!("[LOGGER ERROR] Failed to write {} record: {}", level, err);
        }
        action.apply(self.actions.as_ref(), text);
    }

    /// Log at [`Level::Fatal`], then terminate the process unless
    /// `suppress_exit_on_fatal` is set.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Fatal, message);
    }

    /// Log at [`Level::Panic`], then panic with the message as a `String`
    /// payload unless `suppress_panic_on_panic` is set.
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Panic, message);
    }

    #[track_caller]
    pub fn alert(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Alert, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Error, message);
    }

    #[track_caller]
    pub fn report(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Report, message);
    }

    #[track_caller]
    pub fn notify(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Notify, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Info, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Debug, message);
    }

    /// Log without a severity. Always emitted, tagged with the print level.
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.log_at(Location::caller(), Level::Always, message);
    }

    /// Log at an arbitrary level. [`Level::Always`] behaves like
    /// [`print`](Self::print).
    #[track_caller]
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.log_at(Location::caller(), level, message);
    }

    /// Change the tag used by [`print`](Self::print). Values that do not
    /// convert to a [`Level`] are ignored.
    pub fn set_print_level<L: TryInto<Level>>(&self, level: L) {
        if let Ok(level) = level.try_into() {
            self.state.lock().print_level = level;
        }
    }

    pub fn print_level(&self) -> Level {
        self.state.lock().print_level
    }

    /// Write raw bytes to the sink: no header, no record sentinel.
    ///
    /// # Errors
    ///
    /// Returns the sink's error unless the logger recovers from write
    /// failures, in which case the full length is reported as written.
    pub fn write(&self, bytes: &[u8]) -> Result<usize> {
        let mut state = self.state.lock();
        let sink = &mut state.sink;
        self.guard_sink(bytes.len(), || sink.write(bytes))
    }

    pub fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        let sink = &mut state.sink;
        self.guard_sink((), || sink.flush())
    }

    /// Close the sink.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        let sink = &mut state.sink;
        self.guard_sink((), || sink.close())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn format(&self) -> FormatFlags {
        self.format
    }

    pub fn modes(&self) -> ModeFlags {
        self.modes
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn sink_name(&self) -> String {
        self.state.lock().sink.name().to_string()
    }

    /// Counters for records written and failed writes.
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::prelude::*;
    ///
    /// let logger = Logger::new(MemorySink::new(), "");
    /// logger.info("one");
    /// logger.debug("two");
    ///
    /// assert_eq!(logger.metrics().records_written(), 2);
    /// assert_eq!(logger.metrics().failure_rate(), 0.0);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("format", &self.format)
            .field("modes", &self.modes)
            .field("threshold", &self.threshold)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl io::Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Logger::write(*self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(*self).map_err(io::Error::from)
    }
}

type WrapRotating = Box<dyn FnOnce(Arc<dyn Clock>) -> Box<dyn Sink>>;

enum SinkSlot {
    Plain(Box<dyn Sink>),
    // built once the clock is known
    Rotating(WrapRotating),
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    config: LoggerConfig,
    sink: Option<SinkSlot>,
    actions: Option<Arc<dyn ActionHandler>>,
    clock: Option<Arc<dyn Clock>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sink: None,
            actions: None,
            clock: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: FormatFlags) -> Self {
        self.config.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn modes(mut self, modes: ModeFlags) -> Self {
        self.config.modes = modes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Level) -> Self {
        self.config.threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn print_level(mut self, level: Level) -> Self {
        self.config.print_level = level;
        self
    }

    /// Replace every setting except the sink, handler and clock.
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(SinkSlot::Plain(Box::new(sink)));
        self
    }

    /// Use any [`io::Write`] as the sink.
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: io::Write + Send + 'static>(self, writer: W) -> Self {
        self.sink(WriterSink::new(writer))
    }

    /// Wrap `target` in a [`RotatingSink`] with the default thresholds.
    #[must_use = "builder methods return a new value"]
    pub fn rotating<T: RotateTarget + 'static>(self, target: T) -> Self {
        self.rotating_with(target, RotationThresholds::default())
    }

    /// Wrap `target` in a [`RotatingSink`] with explicit thresholds.
    ///
    /// The rotating sink reads time from the builder's clock.
    #[must_use = "builder methods return a new value"]
    pub fn rotating_with<T: RotateTarget + 'static>(
        mut self,
        target: T,
        thresholds: RotationThresholds,
    ) -> Self {
        self.sink = Some(SinkSlot::Rotating(Box::new(
            move |clock: Arc<dyn Clock>| -> Box<dyn Sink> {
                Box::new(RotatingSink::with_clock(target, thresholds, clock))
            },
        )));
        self
    }

    /// Replace the handler that exits on fatal and panics on panic.
    #[must_use = "builder methods return a new value"]
    pub fn action_handler(mut self, handler: Arc<dyn ActionHandler>) -> Self {
        self.actions = Some(handler);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] when no sink was given or
    /// the configuration fails [`LoggerConfig::validate`].
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let sink = match self.sink {
            Some(SinkSlot::Plain(sink)) => sink,
            Some(SinkSlot::Rotating(wrap)) => wrap(Arc::clone(&clock)),
            None => return Err(LoggerError::config("LoggerBuilder", "no sink configured")),
        };
        let actions = self
            .actions
            .unwrap_or_else(|| Arc::new(ProcessActionHandler));

        Ok(Logger::from_parts(self.config, sink, clock, actions))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
