//! In-memory sink
//!
//! Keeps every byte written to it behind a shared handle, so a clone kept by
//! the caller can read what a logger produced.

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryState {
    bytes: Vec<u8>,
    sentinels: usize,
    closed: bool,
}

/// Shared in-memory byte buffer
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .format(FormatFlags::none())
///     .sink(sink.clone())
///     .build()
///     .unwrap();
///
/// logger.info("hello");
/// assert_eq!(sink.contents(), "[I] \"hello\"\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.state.lock().bytes).into_owned()
    }

    /// Return the contents and clear the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut self.state.lock().bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Number of empty (record boundary) writes received.
    pub fn sentinel_count(&self) -> usize {
        self.state.lock().sentinels
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl Sink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let mut state = self.state.lock();
        if bytes.is_empty() {
            state.sentinels += 1;
        } else {
            state.bytes.extend_from_slice(bytes);
        }
        Ok(bytes.len())
    }

    fn close(&mut self) -> Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
