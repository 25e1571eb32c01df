//! Logger front-end
//!
//! Serializes each event once with [`JsonFormatter`] and hands the bytes to
//! a shared [`FanOutWriter`]. Log calls never fail: serialization problems
//! and destination errors end up in diagnostics and metrics.

use super::{
    destination::Destination,
    error::Result,
    fanout::FanOutWriter,
    log_context::{Attr, LogContext},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::DeliveryMetrics,
    output_format::JsonFormatter,
    worker_pool::WorkerPool,
};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Cheap to clone: clones share the writer and the minimum level.
#[derive(Clone)]
pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    writer: Arc<FanOutWriter>,
    formatter: Arc<JsonFormatter>,
    /// Attributes written into every event, ahead of call-site attributes
    bound: Arc<[Attr]>,
}

impl Logger {
    pub fn new(writer: Arc<FanOutWriter>, min_level: LogLevel) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
            writer,
            formatter: Arc::new(JsonFormatter::new()),
            bound: Arc::from(Vec::new()),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a logger that adds `attrs` to every event. The writer and the
    /// minimum level stay shared with `self`.
    #[must_use]
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let bound: Vec<Attr> = self.bound.iter().cloned().chain(attrs).collect();
        Self {
            min_level: Arc::clone(&self.min_level),
            writer: Arc::clone(&self.writer),
            formatter: Arc::clone(&self.formatter),
            bound: Arc::from(bound),
        }
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    pub fn bound_attrs(&self) -> &[Attr] {
        &self.bound
    }

    pub fn writer(&self) -> &Arc<FanOutWriter> {
        &self.writer
    }

    pub fn metrics(&self) -> &DeliveryMetrics {
        self.writer.metrics()
    }

    /// Serialize and deliver a prepared entry, subject to the level filter
    pub fn log_entry(&self, entry: &LogEntry) {
        if self.enabled(entry.level) {
            self.emit(entry);
        }
    }

    /// Deliver an entry that already passed the level filter
    pub(super) fn emit(&self, entry: &LogEntry) {
        match self.formatter.format(entry, &self.bound) {
            Ok(buf) => {
                self.writer.write(&buf);
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to serialize log entry: {}", e);
            }
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if self.enabled(level) {
            self.emit(&LogEntry::new(level, message));
        }
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) {
        if self.enabled(level) {
            self.emit(&LogEntry::new(level, message).with_context(context));
        }
    }

    pub fn log_attrs(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if self.enabled(level) {
            let context: LogContext = attrs.into_iter().collect();
            self.emit(&LogEntry::new(level, message).with_context(context));
        }
    }

    /// Used by the logging macros to record the call site
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        file: &str,
        line: u32,
        module_path: &str,
    ) {
        if self.enabled(level) {
            self.emit(&LogEntry::new(level, message).with_location(file, line, module_path));
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn audit(&self, message: impl Into<String>) {
        self.log(LogLevel::Audit, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.flush()
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
///
/// ```
/// use fanout_log::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .destination(Arc::new(StreamDestination::stderr()))
///     .attr(Attr::new("service", "billing"))
///     .build();
///
/// logger.audit("invoice approved");
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    destinations: Vec<Arc<dyn Destination>>,
    formatter: JsonFormatter,
    attrs: Vec<Attr>,
    workers: Option<usize>,
    deadline: Option<Duration>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Audit,
            destinations: Vec::new(),
            formatter: JsonFormatter::new(),
            attrs: Vec::new(),
            workers: None,
            deadline: None,
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: Arc<dyn Destination>) -> Self {
        self.destinations.push(destination);
        self
    }

    #[must_use]
    pub fn destinations(mut self, destinations: impl IntoIterator<Item = Arc<dyn Destination>>) -> Self {
        self.destinations.extend(destinations);
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: JsonFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Bind an attribute to every event
    #[must_use]
    pub fn attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Worker threads used for parallel delivery
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// See [`FanOutWriter::with_deadline`]
    #[must_use]
    pub fn write_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn build(self) -> Logger {
        let workers = self.workers.unwrap_or_else(WorkerPool::default_size);
        let writer = FanOutWriter::with_workers(self.destinations, workers).with_deadline(self.deadline);

        Logger {
            min_level: Arc::new(RwLock::new(self.min_level)),
            writer: Arc::new(writer),
            formatter: Arc::new(self.formatter),
            bound: Arc::from(self.attrs),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
