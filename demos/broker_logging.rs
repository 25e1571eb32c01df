//! NATS logging example
//!
//! Publishes every event to `log.<level>.<hostname>` on a local NATS server
//! and mirrors it to stdout. The connection keeps retrying in the
//! background, so the example runs even without a server.
//!
//! Run with: cargo run --example broker_logging -- nats://127.0.0.1:4222

use fanout_log::destinations::broker_subject;
use fanout_log::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== fanout_log - Broker Logging Example ===\n");

    let uri = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "nats://127.0.0.1:4222".to_string());

    let client = ClientBuilder::new()
        .destination("stdout")
        .destination(uri.clone())
        .write_deadline(Some(Duration::from_millis(500)))
        .build()?;

    println!(
        "Publishing to {} on subject {}\n",
        uri,
        broker_subject(client.level_name(), client.hostname())
    );

    for i in 1..=3 {
        fanout_log::global::audit(format!("Heartbeat {}", i));
        std::thread::sleep(Duration::from_millis(200));
    }

    let metrics = client.metrics();
    println!(
        "\nDelivered: {}  Failed: {}  Timed out: {}",
        metrics.delivered(),
        metrics.failed(),
        metrics.timed_out()
    );

    client.close()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
