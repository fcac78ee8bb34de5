//! Log entry capture and line formatting

use super::config::FormatFlags;
use super::log_level::Level;
use super::timestamp;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::panic::Location;

/// One record that passed the gate, ready to be rendered
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    /// Quoted and escaped; never contains a raw newline.
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub location: Option<&'static Location<'static>>,
}

impl LogEntry {
    /// Quote the message so it cannot break the one-line-per-record framing
    ///
    /// Newlines, carriage returns, tabs, quotes and other control characters
    /// come out as escape sequences. An empty message stays empty.
    pub fn escape_message(message: &str) -> String {
        if message.is_empty() {
            String::new()
        } else {
            format!("{:?}", message)
        }
    }

    pub fn new(level: Level, message: &str, timestamp: DateTime<Local>) -> Self {
        Self {
            level,
            message: Self::escape_message(message),
            timestamp,
            location: None,
        }
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// Render header, message and the terminating newline into `buf`
    ///
    /// `tag` is the level whose abbreviation goes into the header, or `None`
    /// when the tag is suppressed. An empty message leaves the bare header
    /// with no trailing space.
    pub fn write_line(&self, buf: &mut String, prefix: &str, format: &FormatFlags, tag: Option<Level>) {
        let start = buf.len();
        if !prefix.is_empty() {
            buf.push_str(prefix);
            buf.push(' ');
        }

        if let Some(level) = tag {
            buf.push_str(level.tag());
            buf.push(' ');
        }

        if format.date {
            timestamp::push_date(buf, &self.timestamp);
            buf.push(' ');
        }
        if format.includes_clock() {
            timestamp::push_clock(buf, &self.timestamp, format.microseconds);
            buf.push(' ');
        }

        if format.includes_file() {
            let (file, line) = match self.location {
                Some(loc) if format.short_file => (short_file(loc.file()), loc.line()),
                Some(loc) => (loc.file(), loc.line()),
                None => ("???", 0),
            };
            let _ = write!(buf, "<{}:{}> ", file, line);
        }

        if self.message.is_empty() {
            if buf.len() > start && buf.ends_with(' ') {
                buf.pop();
            }
        } else {
            buf.push_str(&self.message);
        }
        buf.push('\n');
    }
}

/// Base name of a source path, for either separator style.
fn short_file(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 4, 5, 6, 7)
            .single()
            .expect("valid datetime")
            + chrono::TimeDelta::microseconds(42)
    }

    fn render(entry: &LogEntry, prefix: &str, format: FormatFlags, tag: Option<Level>) -> String {
        let mut buf = String::new();
        entry.write_line(&mut buf, prefix, &format, tag);
        buf
    }

    #[test]
    fn test_escape_message() {
        assert_eq!(LogEntry::escape_message("info"), "\"info\"");
        assert_eq!(LogEntry::escape_message(""), "");
        assert_eq!(
            LogEntry::escape_message("a\nb\r\tc\"d"),
            "\"a\\nb\\r\\tc\\\"d\""
        );
        assert!(!LogEntry::escape_message("x\ny").contains('\n'));
    }

    #[test]
    fn test_prefix_and_tag() {
        let entry = LogEntry::new(Level::Info, "info", at());
        assert_eq!(
            render(&entry, "prefix", FormatFlags::none(), Some(Level::Info)),
            "prefix [I] \"info\"\n"
        );
        assert_eq!(render(&entry, "", FormatFlags::none(), None), "\"info\"\n");
    }

    #[test]
    fn test_date_time_fields() {
        let entry = LogEntry::new(Level::Alert, "up", at());
        assert_eq!(
            render(&entry, "", FormatFlags::default(), Some(Level::Alert)),
            "[A] 2024-03-04 05:06:07 \"up\"\n"
        );
        assert_eq!(
            render(&entry, "", FormatFlags::none().with_microseconds(true), None),
            "05:06:07.000042 \"up\"\n"
        );
    }

    #[test]
    fn test_file_location() {
        let here = Location::caller();
        let entry = LogEntry::new(Level::Debug, "loc", at()).with_location(here);

        let short = render(&entry, "", FormatFlags::none().with_short_file(true), None);
        assert_eq!(short, format!("<log_entry.rs:{}> \"loc\"\n", here.line()));

        let long = render(&entry, "", FormatFlags::none().with_long_file(true), None);
        assert!(long.starts_with(&format!("<{}:", here.file())));
        assert!(long.contains("log_entry.rs"));
    }

    #[test]
    fn test_missing_location_placeholder() {
        let entry = LogEntry::new(Level::Debug, "x", at());
        assert_eq!(
            render(&entry, "", FormatFlags::none().with_short_file(true), None),
            "<???:0> \"x\"\n"
        );
    }

    #[test]
    fn test_empty_message_still_terminated() {
        let entry = LogEntry::new(Level::Info, "", at());
        assert_eq!(render(&entry, "p", FormatFlags::none(), None), "p\n");
        assert_eq!(render(&entry, "", FormatFlags::none(), Some(Level::Info)), "[I]\n");
        assert_eq!(render(&entry, "", FormatFlags::none(), None), "\n");
        assert_eq!(
            render(&entry, "p", FormatFlags::none().with_short_file(true), None),
            "p <???:0>\n"
        );
    }

    #[test]
    fn test_short_file() {
        assert_eq!(short_file("src/core/logger.rs"), "logger.rs");
        assert_eq!(short_file("C:\\src\\main.rs"), "main.rs");
        assert_eq!(short_file("main.rs"), "main.rs");
    }
}
