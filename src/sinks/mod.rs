//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod rotating;
pub mod writer;

pub use console::{ConsoleSink, ConsoleStream};
pub use file::FileTarget;
pub use memory::MemorySink;
pub use rotating::{RotatingSink, RotationThresholds};
pub use writer::WriterSink;

pub use crate::core::{RotateTarget, Sink};
