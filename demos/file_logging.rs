//! File logging example
//!
//! Appends JSON events to a dated file in the temp directory while also
//! writing them to stderr.
//!
//! Run with: cargo run --example file_logging

use fanout_log::core::attributes;
use fanout_log::log_file_name::log_file_name;
use fanout_log::prelude::*;
use std::fs;
use std::io;

fn main() -> Result<()> {
    println!("=== fanout_log - File Logging Example ===\n");

    let layout = std::env::temp_dir().join("fanout-demo-{user}-%Y-%m-%d.log");
    let path = log_file_name(&layout.to_string_lossy());
    println!("Log file: {}\n", path);

    let client = ClientBuilder::new()
        .destination("stderr")
        .destination(path.clone())
        .add_source(true)
        .install_global(false)
        .build()?;

    let logger = client.logger();
    logger.audit("Service started");

    let err = io::Error::new(io::ErrorKind::NotFound, "config.toml missing");
    logger.log_attrs(
        LogLevel::Error,
        "Falling back to defaults",
        [
            attributes::error(&err),
            attributes::extended_group([Attr::new("path", "/etc/app/config.toml")]),
        ],
    );

    logger
        .audit_builder()
        .message("Batch imported")
        .field("rows", 1200i64)
        .field("source", "sftp")
        .log();

    client.close()?;

    println!("\nFile contents:");
    print!("{}", fs::read_to_string(&path)?);
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
