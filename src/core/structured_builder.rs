//! Structured log builder for fluent log entry construction

use super::log_context::{Attr, FieldValue, LogContext};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::logger::Logger;

/// Builder for structured log entries
///
/// # Example
///
/// ```
/// use fanout_log::prelude::*;
/// use fanout_log::core::attributes;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .destination(Arc::new(StreamDestination::stderr()))
///     .build();
///
/// logger.audit_builder()
///     .message("Permission granted")
///     .attr(attributes::user("alice"))
///     .attr(attributes::action("grant"))
///     .field("role", "admin")
///     .log();
/// ```
pub struct StructuredLogBuilder<'a> {
    logger: &'a Logger,
    level: LogLevel,
    message: String,
    context: LogContext,
    location: Option<(&'static str, u32, &'static str)>,
}

impl<'a> StructuredLogBuilder<'a> {
    pub fn new(logger: &'a Logger, level: LogLevel) -> Self {
        Self {
            logger,
            level,
            message: String::new(),
            context: LogContext::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    #[must_use]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.add_field(key, value);
        self
    }

    #[must_use]
    pub fn attr(mut self, attr: Attr) -> Self {
        self.context.add_attr(attr);
        self
    }

    /// Add multiple fields from a LogContext
    #[must_use]
    pub fn fields(mut self, context: LogContext) -> Self {
        for attr in context.attrs() {
            self.context.add_attr(attr.clone());
        }
        self
    }

    #[must_use]
    pub fn location(mut self, file: &'static str, line: u32, module_path: &'static str) -> Self {
        self.location = Some((file, line, module_path));
        self
    }

    /// Build and send the log entry
    pub fn log(self) {
        if !self.logger.enabled(self.level) {
            return;
        }

        let mut entry = LogEntry::new(self.level, self.message).with_context(self.context);
        if let Some((file, line, module_path)) = self.location {
            entry = entry.with_location(file, line, module_path);
        }
        self.logger.emit(&entry);
    }
}

impl Logger {
    pub fn debug_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Debug)
    }

    pub fn info_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Info)
    }

    /// Audit-grade events: who did what, in which category.
    pub fn audit_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Audit)
    }

    pub fn warn_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Warn)
    }

    pub fn error_builder(&self) -> StructuredLogBuilder<'_> {
        StructuredLogBuilder::new(self, LogLevel::Error)
    }
}
