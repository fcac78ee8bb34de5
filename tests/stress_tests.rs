//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from many threads are never torn or lost
//! - Rotation under concurrent load keeps every record exactly once
//! - Joining loggers while broadcasts are in flight
//! - A panicking sink in recover mode does not poison the logger

use leveled_logger::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[test]
fn test_concurrent_records_are_whole() {
    let sink = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .prefix("stress")
            .format(FormatFlags::none().with_microseconds(true))
            .sink(sink.clone())
            .build()
            .expect("Failed to build logger"),
    );

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    leveled_logger::info!(logger, "t{} #{} with\nnewline", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let content = sink.contents();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert_eq!(sink.sentinel_count(), THREADS * PER_THREAD);
    for line in &lines {
        assert!(line.starts_with("stress [I] "), "torn line: {}", line);
        assert!(line.ends_with("with\\nnewline\""), "torn line: {}", line);
    }

    for t in 0..THREADS {
        let needle = format!("\"t{} #", t);
        let count = lines.iter().filter(|line| line.contains(&needle)).count();
        assert_eq!(count, PER_THREAD, "thread {} lost records", t);
    }
    assert_eq!(logger.metrics().records_written(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_concurrent_rotation_keeps_every_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let target = FileTarget::new(temp_dir.path().join("rot.log")).expect("Failed to create target");
    let logger = Arc::new(
        Logger::builder()
            .format(FormatFlags::none())
            .rotating_with(target, RotationThresholds::new(-1, 50, -1))
            .build()
            .expect("Failed to build logger"),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..250 {
                    logger.report(format_args!("{}-{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.close().expect("Failed to close");

    let files: Vec<_> = fs::read_dir(temp_dir.path())
        .expect("Failed to read dir")
        .map(|entry| entry.expect("entry").path())
        .collect();
    // the first file plus one per 50 records
    assert_eq!(files.len(), 1 + 1000 / 50);

    let mut total = 0;
    for file in &files {
        let lines = fs::read_to_string(file).expect("Failed to read").lines().count();
        assert!(lines == 50 || lines == 0, "{} holds {} lines", file.display(), lines);
        total += lines;
    }
    assert_eq!(total, 1000);
}

#[test]
fn test_join_during_broadcast() {
    let sink = MemorySink::new();
    let make = |prefix: String| {
        Logger::builder()
            .prefix(prefix)
            .format(FormatFlags::none())
            .sink(sink.clone())
            .build()
            .map(Arc::new)
            .expect("Failed to build logger")
    };

    let multi = Arc::new(MultiLogger::new([make("m0".to_string())]));
    let broadcasts = Arc::new(AtomicUsize::new(0));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let multi = Arc::clone(&multi);
            let broadcasts = Arc::clone(&broadcasts);
            thread::spawn(move || {
                for _ in 0..200 {
                    multi.notify("tick");
                    broadcasts.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    let joiner = {
        let multi = Arc::clone(&multi);
        let loggers: Vec<_> = (1..20).map(|i| make(format!("m{}", i))).collect();
        thread::spawn(move || {
            for logger in loggers {
                multi.join([logger]);
                thread::yield_now();
            }
        })
    };

    for handle in writers {
        handle.join().expect("Writer panicked");
    }
    joiner.join().expect("Joiner panicked");

    assert_eq!(multi.len(), 20);
    assert_eq!(broadcasts.load(Ordering::SeqCst), 800);

    let content = sink.contents();
    // every broadcast reached at least the first member, whole
    let first = content.lines().filter(|line| *line == "m0 [N] \"tick\"").count();
    assert_eq!(first, 800);
    assert!(content.lines().all(|line| line.ends_with(" [N] \"tick\"")));
}

struct FlakySink {
    writes: usize,
    inner: MemorySink,
}

impl Sink for FlakySink {
    fn write(&mut self, bytes: &[u8]) -> leveled_logger::Result<usize> {
        self.writes += 1;
        if self.writes % 7 == 0 {
            panic!("flaky sink");
        }
        if self.writes % 5 == 0 {
            return Err(LoggerError::other("flaky sink"));
        }
        self.inner.write(bytes)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

#[test]
fn test_recover_mode_survives_failing_sink() {
    let sink = MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .format(FormatFlags::none())
            .modes(
                ModeFlags::new()
                    .with_recover_on_write_failure(true)
                    .with_suppress_record_sentinel(true),
            )
            .sink(FlakySink {
                writes: 0,
                inner: sink.clone(),
            })
            .build()
            .expect("Failed to build logger"),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    let result = logger.output(
                        std::panic::Location::caller(),
                        &format!("record {}", i),
                        Some(Level::Info),
                    );
                    assert!(result.is_ok());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let metrics = logger.metrics();
    let written = sink.contents().lines().count() as u64;
    assert_eq!(metrics.records_written(), written);
    assert_eq!(metrics.records_written() + metrics.recovered_failures(), 400);
    assert!(metrics.recovered_failures() > 0);
}
