//! Basic usage example
//!
//! Demonstrates leveled logging to the console, header flags, the level
//! gate and fan-out to several loggers.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{info, notify};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Leveled Logger - Basic Usage Example ===\n");

    println!("1. Default logger (date and time headers):");
    let logger = Logger::new(ConsoleSink::stdout(), "app");
    logger.info("Application started");
    logger.alert("Disk usage above 90%");
    info!(logger, "Listening on port {}", 8080);

    println!("\n2. Location and microseconds:");
    let detailed = Logger::builder()
        .prefix("detail")
        .format(
            FormatFlags::none()
                .with_microseconds(true)
                .with_short_file(true),
        )
        .sink(ConsoleSink::stdout())
        .build()?;
    detailed.debug("Connection pool initialised");
    notify!(detailed, "{} workers ready", 4);

    println!("\n3. Threshold gate (errors and worse):");
    let strict = Logger::builder()
        .prefix("strict")
        .threshold(Level::Error)
        .sink(ConsoleSink::stdout())
        .build()?;
    strict.info("not shown");
    strict.error("shown");

    println!("\n4. Unleveled print:");
    strict.print("print is never filtered");
    strict.set_print_level(Level::Notify);
    strict.print("now tagged as notify");

    println!("\n5. Fan-out:");
    let multi = MultiLogger::new([Arc::new(logger), Arc::new(strict)]);
    multi.error("Sent to both loggers");
    multi.info("Only the default logger shows this");

    println!("\n6. Messages stay on one line:");
    let logger = Logger::new(ConsoleSink::stdout(), "safe");
    logger.report("line one\nline two");

    println!("\n=== Example completed successfully ===");
    Ok(())
}
