//! Adapter from any `io::Write` to a sink

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

/// Sink over an arbitrary writer
///
/// The record boundary write is not forwarded. Writes are not buffered here;
/// wrap the writer in a `BufWriter` if that is wanted, and call
/// [`Logger::flush`](crate::Logger::flush) before reading the output.
///
/// # Examples
///
/// ```
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .format(FormatFlags::none())
///     .writer(std::io::sink())
///     .build()
///     .unwrap();
/// logger.info("discarded");
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: Option<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref()
    }

    /// The writer, unless the sink has been closed.
    pub fn into_inner(mut self) -> Option<W> {
        self.writer.take()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::not_open("writer"))?;

        if !bytes.is_empty() {
            writer.write_all(bytes)?;
        }
        Ok(bytes.len())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flush and drop the writer.
    fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => Ok(writer.flush()?),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "writer"
    }
}

impl<W: Write + Send> Drop for WriterSink<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
