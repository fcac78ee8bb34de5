//! File rotation example
//!
//! Writes records into a directory of timestamped files and rotates them
//! by record count and by size.
//!
//! Run with: cargo run --example file_rotation

use leveled_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Leveled Logger - File Rotation Example ===\n");

    let dir = std::env::temp_dir().join("leveled_logger_demo");

    println!("1. Rotate every 10 records:");
    let target = FileTarget::new(dir.join("records").join("app.log"))?;
    println!("   first file: {:?}", target.path());
    let logger = Logger::builder()
        .prefix("records")
        .rotating_with(target, RotationThresholds::new(-1, 10, -1))
        .build()?;
    for i in 0..35 {
        leveled_logger::info!(logger, "record {}", i);
    }
    logger.close()?;
    list(&dir.join("records"))?;

    println!("\n2. Rotate every 1 KiB, or hourly:");
    let target = FileTarget::new(dir.join("size").join(""))?;
    let logger = Logger::builder()
        .prefix("size")
        .format(FormatFlags::default().with_microseconds(true))
        .rotating_with(target, RotationThresholds::new(1024, -1, 60))
        .build()?;
    for i in 0..50 {
        leveled_logger::report!(logger, "payload {} {}", i, "x".repeat(40));
    }
    logger.close()?;
    list(&dir.join("size"))?;

    println!("\nLogs written under {}", dir.display());
    Ok(())
}

fn list(dir: &std::path::Path) -> Result<()> {
    let mut names: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    for name in names {
        println!("   {}", name);
    }
    Ok(())
}
