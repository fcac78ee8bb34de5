//! Criterion benchmarks for leveled_logger

use chrono::{DateTime, Local};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use leveled_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn discard(format: FormatFlags, threshold: Level) -> Logger {
    Logger::builder()
        .prefix("bench")
        .format(format)
        .threshold(threshold)
        .writer(std::io::sink())
        .build()
        .expect("Failed to build logger")
}

struct NullTarget;

impl Sink for NullTarget {
    fn write(&mut self, bytes: &[u8]) -> leveled_logger::Result<usize> {
        Ok(bytes.len())
    }

    fn name(&self) -> &str {
        "null"
    }
}

impl RotateTarget for NullTarget {
    fn rotate(&mut self, _begin: DateTime<Local>, _now: DateTime<Local>) -> leveled_logger::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new", |b| {
        b.iter(|| black_box(Logger::new(WriterSink::new(std::io::sink()), "bench")));
    });

    group.bench_function("builder_rotating", |b| {
        b.iter(|| {
            let logger = Logger::builder()
                .rotating(NullTarget)
                .build()
                .expect("Failed to build logger");
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_header_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_formats");
    group.throughput(Throughput::Elements(1));

    let formats = [
        ("none", FormatFlags::none()),
        ("date_time", FormatFlags::default()),
        ("microseconds", FormatFlags::default().with_microseconds(true)),
        ("short_file", FormatFlags::default().with_short_file(true)),
    ];

    for (name, format) in formats {
        let logger = discard(format, Level::Debug);
        group.bench_function(name, |b| {
            b.iter(|| logger.info(black_box("Info message")));
        });
    }

    let logger = discard(FormatFlags::default(), Level::Debug);
    group.bench_function("format_args", |b| {
        b.iter(|| leveled_logger::info!(logger, "user {} did {}", black_box(42), "login"));
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = discard(FormatFlags::default(), Level::Error);

    group.bench_function("filtered_out", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.bench_function("filtered_out_format_args", |b| {
        b.iter(|| leveled_logger::debug!(logger, "value {}", black_box(7)));
    });

    group.bench_function("passed", |b| {
        b.iter(|| logger.error(black_box("Error message")));
    });

    group.finish();
}

fn bench_rotating_sink(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotating_sink");
    group.throughput(Throughput::Elements(1));

    let plain = Logger::builder()
        .format(FormatFlags::none())
        .sink(NullTarget)
        .build()
        .expect("Failed to build logger");
    group.bench_function("plain_target", |b| {
        b.iter(|| plain.info(black_box("message")));
    });

    let counted = Logger::builder()
        .format(FormatFlags::none())
        .rotating_with(NullTarget, RotationThresholds::new(0, 0, -1))
        .build()
        .expect("Failed to build logger");
    group.bench_function("size_and_records", |b| {
        b.iter(|| counted.info(black_box("message")));
    });

    let aged = Logger::builder()
        .format(FormatFlags::none())
        .rotating(NullTarget)
        .build()
        .expect("Failed to build logger");
    group.bench_function("all_triggers", |b| {
        b.iter(|| aged.info(black_box("message")));
    });

    group.finish();
}

fn bench_multi_logger(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_logger");

    for members in [1usize, 4, 16] {
        let multi = MultiLogger::new(
            (0..members).map(|_| Arc::new(discard(FormatFlags::default(), Level::Debug))),
        );
        group.throughput(Throughput::Elements(members as u64));
        group.bench_function(format!("fan_out_{}", members), |b| {
            b.iter(|| multi.info(black_box("broadcast")));
        });
    }

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");
    group.throughput(Throughput::Elements(4 * 100));

    let logger = Arc::new(discard(FormatFlags::default(), Level::Debug));

    group.bench_function("4_threads_100_records", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    thread::spawn(move || {
                        for i in 0..100 {
                            leveled_logger::info!(logger, "record {}", i);
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_header_formats,
    bench_level_filtering,
    bench_rotating_sink,
    bench_multi_logger,
    bench_concurrent_logging
);

criterion_main!(benches);
