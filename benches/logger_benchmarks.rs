//! Criterion benchmarks for fanout_log

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fanout_log::core::attributes;
use fanout_log::normalize::normalize;
use fanout_log::prelude::*;
use std::sync::Arc;

/// Accepts and discards every event
struct Discard;

impl Destination for Discard {
    fn write_all(&self, buf: &[u8]) -> Result<()> {
        black_box(buf);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}

fn logger_with(destinations: usize) -> Logger {
    Logger::builder()
        .destinations((0..destinations).map(|_| Arc::new(Discard) as Arc<dyn Destination>))
        .attr(attributes::hostname("bench-host"))
        .build()
}

// ============================================================================
// Fan-out Benchmarks
// ============================================================================

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");
    group.throughput(Throughput::Elements(1));

    for destinations in [1usize, 2, 4, 8] {
        let logger = logger_with(destinations);
        group.bench_with_input(
            BenchmarkId::new("audit", destinations),
            &logger,
            |b, logger| {
                b.iter(|| logger.audit(black_box("benchmark event")));
            },
        );
    }

    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let logger = logger_with(3);

    c.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("never written")));
    });
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    let formatter = JsonFormatter::new();
    let bound = [attributes::hostname("bench-host")];

    let plain = LogEntry::new(LogLevel::Audit, "plain message");
    group.bench_function("plain", |b| {
        b.iter(|| formatter.format(black_box(&plain), &bound));
    });

    let structured = LogEntry::new(LogLevel::Audit, "structured message").with_context(
        LogContext::new()
            .with_attr(attributes::category("billing"))
            .with_attr(attributes::action("refund"))
            .with_attr(attributes::user("alice"))
            .with_field("amount_cents", 1299i64),
    );
    group.bench_function("structured", |b| {
        b.iter(|| formatter.format(black_box(&structured), &bound));
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_hostname", |b| {
        b.iter(|| normalize(black_box("ip-10-0-12-34.eu-west-1.compute.internal")));
    });
}

criterion_group!(
    benches,
    bench_fanout,
    bench_filtered,
    bench_formatting,
    bench_normalize
);
criterion_main!(benches);
