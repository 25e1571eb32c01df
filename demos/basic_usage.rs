//! Basic client usage example
//!
//! Logs to stdout and stderr at once through the process default logger.
//!
//! Run with: cargo run --example basic_usage

use fanout_log::core::attributes;
use fanout_log::prelude::*;
use fanout_log::{audit, global, warn};

fn main() -> Result<()> {
    println!("=== fanout_log - Basic Usage Example ===\n");

    let client = ClientBuilder::new()
        .destination("stdout,stderr")
        .level("info")
        .build()?;

    println!("1. Logging through the process default:");
    global::debug("Debug message (hidden at INFO)");
    global::info("Info message");
    global::audit("Audit message");
    global::error("Error message");

    println!("\n2. Structured attributes:");
    global::log_attrs(
        LogLevel::Audit,
        "Password changed",
        [
            attributes::category("security"),
            attributes::action("password_change"),
            attributes::user("alice"),
        ],
    );

    println!("\n3. A component logger with bound attributes:");
    let billing = client.logger().with([attributes::category("billing")]);
    audit!(billing, "Invoice {} approved", 1042);
    warn!(billing, "Invoice {} is overdue by {} days", 977, 12);

    println!("\n4. Raising the level at runtime:");
    client.logger().set_min_level(LogLevel::Warn);
    global::audit("Audit message (hidden at WARN)");
    global::warn("Warning message");

    client.close()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
