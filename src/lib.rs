//! # fanout_log
//!
//! Structured logging client that writes every event, once serialized as a
//! JSON object, to any number of destinations at the same time: the process
//! stdout or stderr, append-only files and `nats://` message brokers.
//!
//! ## Features
//!
//! - **One event, many destinations**: a single log call is delivered to
//!   every configured destination in parallel
//! - **Isolation**: a failing or panicking destination never stops the
//!   others, and log calls never return errors
//! - **Audit level**: a custom `AUDIT` level between `INFO` and `WARN`,
//!   which is also the default minimum level
//! - **Broker subjects**: events are published to
//!   `log.<level>.<normalized hostname>`
//!
//! ## Quick start
//!
//! ```no_run
//! use fanout_log::{core::attributes, ClientBuilder, LogLevel};
//!
//! let client = ClientBuilder::new()
//!     .destination("stderr")
//!     .destination("/var/log/app.log")
//!     .build()?;
//!
//! fanout_log::global::log_attrs(
//!     LogLevel::Audit,
//!     "user logged in",
//!     [attributes::user("alice"), attributes::action("login")],
//! );
//!
//! client.close()?;
//! # Ok::<(), fanout_log::LoggerError>(())
//! ```

pub mod client;
pub mod core;
pub mod destinations;
pub mod log_file_name;
pub mod macros;
pub mod normalize;

pub use crate::core::global;

pub mod prelude {
    pub use crate::client::{Client, ClientBuilder, ClientOptions, DestinationSpec};
    pub use crate::core::{
        attributes, Attr, DeliveryMetrics, Destination, FieldValue, JsonFormatter, LogContext,
        LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, Result, StructuredLogBuilder,
        TimestampFormat,
    };
    pub use crate::destinations::{FileDestination, ReconnectPolicy, StreamDestination};
}

pub use crate::client::{Client, ClientBuilder, ClientOptions, DestinationSpec};
pub use crate::core::{
    Attr, DeliveryMetrics, Destination, FanOutWriter, FieldValue, JsonFormatter, LogContext,
    LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, Result, SourceLocation,
    StructuredLogBuilder, TimestampFormat, WorkerPool,
};
pub use crate::destinations::{
    BrokerConnection, BrokerConnector, BrokerDestination, FileDestination, ReconnectPolicy,
    StreamDestination,
};
#[cfg(feature = "nats")]
pub use crate::destinations::{NatsConnection, NatsConnector};
pub use crate::log_file_name::log_file_name;
pub use crate::normalize::{denormalize, normalize};
