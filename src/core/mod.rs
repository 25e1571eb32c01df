//! Core logger types and traits

pub mod attributes;
pub mod destination;
pub mod error;
pub mod fanout;
pub mod global;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod structured_builder;
pub mod timestamp;
pub mod worker_pool;

pub use destination::Destination;
pub use error::{LoggerError, Result};
pub use fanout::FanOutWriter;
pub use log_context::{Attr, FieldValue, LogContext};
pub use log_entry::{LogEntry, SourceLocation};
pub use log_level::{LogLevel, CUSTOM_LEVELS};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::DeliveryMetrics;
pub use output_format::JsonFormatter;
pub use structured_builder::StructuredLogBuilder;
pub use timestamp::TimestampFormat;
pub use worker_pool::{WorkerPool, DEFAULT_SHUTDOWN_TIMEOUT};
