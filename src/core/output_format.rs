//! JSON serialization of log entries
//!
//! Every entry becomes one JSON object on one line:
//!
//! `{"time":"2025-01-08T10:30:45.123Z","level":"AUDIT","msg":"user login","hostname":"web-1","user":"alice"}`

use super::error::Result;
use super::log_context::Attr;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde_json::{Map, Value};

pub const TIME_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const SOURCE_KEY: &str = "source";
pub const MESSAGE_KEY: &str = "msg";

/// Prefix given to an attribute whose key is already taken in the event
pub const SHADOWED_PREFIX: &str = "fields.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
    add_source: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Emit the call site under `source` when the entry carries one
    #[must_use]
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Build the JSON object for an entry. `bound` attributes precede the
    /// entry's own context.
    ///
    /// Attributes never replace a key that is already present. The
    /// `time`, `level`, `source` and `msg` fields and every bound attribute
    /// (`hostname` for client loggers) keep their values; a colliding
    /// attribute is written as `fields.<key>` instead, and dropped if that
    /// key is taken too.
    pub fn to_value(&self, entry: &LogEntry, bound: &[Attr]) -> Value {
        let mut object = Map::with_capacity(4 + bound.len() + entry.context.len());

        object.insert(
            TIME_KEY.to_string(),
            self.timestamp_format.to_json_value(&entry.timestamp),
        );
        // Always the level name, never its numeric value
        object.insert(
            LEVEL_KEY.to_string(),
            Value::String(entry.level.name().to_string()),
        );

        if self.add_source {
            if let Some(ref source) = entry.source {
                let mut location = Map::with_capacity(3);
                location.insert("function".to_string(), Value::String(source.module_path.clone()));
                location.insert("file".to_string(), Value::String(source.file.clone()));
                location.insert("line".to_string(), Value::Number(source.line.into()));
                object.insert(SOURCE_KEY.to_string(), Value::Object(location));
            }
        }

        object.insert(MESSAGE_KEY.to_string(), Value::String(entry.message.clone()));

        for attr in bound.iter().chain(entry.context.attrs()) {
            let key = if object.contains_key(&attr.key) {
                format!("{}{}", SHADOWED_PREFIX, attr.key)
            } else {
                attr.key.clone()
            };
            if !object.contains_key(&key) {
                object.insert(key, attr.value.to_json_value());
            }
        }

        Value::Object(object)
    }

    /// Serialize an entry as one newline terminated JSON line
    pub fn format(&self, entry: &LogEntry, bound: &[Attr]) -> Result<Vec<u8>> {
        let mut buf = serde_json::to_vec(&self.to_value(entry, bound))?;
        buf.push(b'\n');
        Ok(buf)
    }
}
