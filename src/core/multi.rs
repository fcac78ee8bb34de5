//! Fan-out of one call to several loggers

use super::log_level::Level;
use super::logger::Logger;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;

/// Broadcasts each call to every joined [`Logger`], in join order
///
/// Every member applies its own gate, prefix and format flags. Member
/// failures are reported on stderr and never stop delivery to the others.
/// Fatal and panic calls only write; no member exits or panics on behalf of
/// the broadcast.
///
/// Broadcasts share a read lock and [`join`](Self::join) takes the write lock,
/// so joining from inside a member's sink deadlocks.
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = MemorySink::new();
/// let build = |prefix: &str| {
///     Logger::builder()
///         .prefix(prefix)
///         .format(FormatFlags::none())
///         .sink(sink.clone())
///         .build()
///         .map(Arc::new)
/// };
///
/// let multi = MultiLogger::new([build("a").unwrap()]);
/// multi.join([build("b").unwrap()]);
/// multi.info("hello");
///
/// assert_eq!(sink.contents(), "a [I] \"hello\"\nb [I] \"hello\"\n");
/// ```
#[derive(Debug, Default)]
pub struct MultiLogger {
    members: RwLock<Vec<Option<Arc<Logger>>>>,
}

impl MultiLogger {
    /// Entries that are `None` are kept and skipped on every broadcast.
    pub fn new<I, L>(loggers: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Option<Arc<Logger>>>,
    {
        Self {
            members: RwLock::new(loggers.into_iter().map(Into::into).collect()),
        }
    }

    /// Append loggers. Duplicates are kept.
    pub fn join<I, L>(&self, loggers: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Option<Arc<Logger>>>,
    {
        self.members
            .write()
            .extend(loggers.into_iter().map(Into::into));
    }

    /// Number of joined entries, `None` entries included.
    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Forward a preformatted message to every member's
    /// [`Logger::output`]. Without a level the record is tagged `[Z]`.
    pub fn output(&self, caller: &'static Location<'static>, message: &str, level: Option<Level>) {
        let level = level.unwrap_or(Level::Always);
        let members = self.members.read();
        deliver_all(&members, caller, message, level, false);
    }

    fn broadcast(&self, caller: &'static Location<'static>, level: Level, message: impl fmt::Display) {
        let members = self.members.read();
        if !members.iter().flatten().any(|logger| logger.enabled(level)) {
            return;
        }
        let text = message.to_string();
        deliver_all(&members, caller, &text, level, true);
    }

    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Fatal, message);
    }

    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Panic, message);
    }

    #[track_caller]
    pub fn alert(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Alert, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Error, message);
    }

    #[track_caller]
    pub fn report(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Report, message);
    }

    #[track_caller]
    pub fn notify(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Notify, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Info, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Debug, message);
    }

    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.broadcast(Location::caller(), Level::Always, message);
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.broadcast(Location::caller(), level, message);
    }
}

fn deliver_all(
    members: &[Option<Arc<Logger>>],
    caller: &'static Location<'static>,
    message: &str,
    level: Level,
    print_tag: bool,
) {
    for (idx, logger) in members.iter().enumerate() {
        let Some(logger) = logger else {
            continue;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.emit(caller, message, level, print_tag)
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Logger #{} ({}) failed: {}", idx, logger.prefix(), e);
            }
            Err(payload) => {
                eprintln!(
                    "[LOGGER CRITICAL] Logger #{} ({}) panicked: {}. \
                     Other loggers continue to function.",
                    idx,
                    logger.prefix(),
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
