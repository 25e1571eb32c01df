//! Client configuration

use super::Client;
use crate::core::{LogLevel, Result, TimestampFormat};
use crate::destinations::{BrokerConnector, ReconnectPolicy, StreamDestination};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a [`Client`].
///
/// Plain data fields deserialize from any serde format, so the host
/// application can keep them in its own config file:
///
/// ```
/// use fanout_log::ClientOptions;
///
/// let options: ClientOptions = serde_json::from_str(r#"{
///     "destinations": ["stderr", "/var/log/app.log"],
///     "level": "audit",
///     "hostname": "web-1"
/// }"#).unwrap();
/// assert_eq!(options.destinations.len(), 2);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// `stdout`, `stderr`, file paths and `nats://` URIs; comma separated
    /// lists are accepted. Empty means stderr.
    pub destinations: Vec<String>,

    /// Minimum level name. Empty or unknown means `AUDIT`.
    pub level: String,

    /// Record the call site of macro based log statements
    pub add_source: bool,

    /// Host identity for the `hostname` field and broker subjects. Empty
    /// means the local host name.
    pub hostname: String,

    pub timestamp_format: TimestampFormat,

    /// Fan-out worker threads; defaults to the available parallelism
    pub fanout_workers: Option<usize>,

    /// Stop waiting for slow destinations after this many milliseconds.
    /// Unset waits for every destination.
    pub write_deadline_ms: Option<u64>,

    pub reconnect: ReconnectPolicy,

    /// Replaces the process stdout for `stdout` destinations
    #[serde(skip)]
    pub stdout: Option<Arc<StreamDestination>>,

    /// Replaces the process stderr for `stderr` destinations
    #[serde(skip)]
    pub stderr: Option<Arc<StreamDestination>>,

    /// Opens broker connections; defaults to NATS when that feature is on
    #[serde(skip)]
    pub connector: Option<Arc<dyn BrokerConnector>>,
}

pub const DEFAULT_LEVEL_NAME: &str = "AUDIT";

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level name after defaulting; also used in broker subjects.
    pub fn level_name(&self) -> &str {
        let level = self.level.trim();
        if level.is_empty() {
            DEFAULT_LEVEL_NAME
        } else {
            level
        }
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::resolve(self.level_name())
    }

    /// Configured hostname, or the local host name.
    pub fn resolved_hostname(&self) -> String {
        let hostname = self.hostname.trim();
        if !hostname.is_empty() {
            return hostname.to_string();
        }
        local_hostname()
    }

    pub fn write_deadline(&self) -> Option<Duration> {
        self.write_deadline_ms.map(Duration::from_millis)
    }
}

pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("destinations", &self.destinations)
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("hostname", &self.hostname)
            .field("timestamp_format", &self.timestamp_format)
            .field("fanout_workers", &self.fanout_workers)
            .field("write_deadline_ms", &self.write_deadline_ms)
            .field("reconnect", &self.reconnect)
            .field("stdout_override", &self.stdout.is_some())
            .field("stderr_override", &self.stderr.is_some())
            .field("custom_connector", &self.connector.is_some())
            .finish()
    }
}

/// Fluent construction of a [`Client`]
///
/// # Example
///
/// ```no_run
/// use fanout_log::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .destination("stderr")
///     .destination("/var/log/app.log")
///     .destination("nats://127.0.0.1:4222")
///     .level("info")
///     .build()?;
///
/// fanout_log::global::audit("service started");
/// client.close()?;
/// # Ok::<(), fanout_log::LoggerError>(())
/// ```
pub struct ClientBuilder {
    options: ClientOptions,
    install_global: bool,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            options: ClientOptions::default(),
            install_global: true,
        }
    }

    pub fn from_options(options: ClientOptions) -> Self {
        Self {
            options,
            install_global: true,
        }
    }

    #[must_use]
    pub fn destination(mut self, descriptor: impl Into<String>) -> Self {
        self.options.destinations.push(descriptor.into());
        self
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.options.level = level.into();
        self
    }

    #[must_use]
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.options.hostname = hostname.into();
        self
    }

    #[must_use]
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.options.add_source = add_source;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.options.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn stdout(mut self, stream: Arc<StreamDestination>) -> Self {
        self.options.stdout = Some(stream);
        self
    }

    #[must_use]
    pub fn stderr(mut self, stream: Arc<StreamDestination>) -> Self {
        self.options.stderr = Some(stream);
        self
    }

    #[must_use]
    pub fn connector(mut self, connector: Arc<dyn BrokerConnector>) -> Self {
        self.options.connector = Some(connector);
        self
    }

    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.options.fanout_workers = Some(workers);
        self
    }

    #[must_use]
    pub fn write_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.options.write_deadline_ms =
            deadline.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.options.reconnect = policy;
        self
    }

    /// Whether `build` installs the client as the process default logger.
    /// On by default.
    #[must_use]
    pub fn install_global(mut self, install: bool) -> Self {
        self.install_global = install;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn build(self) -> Result<Client> {
        if self.install_global {
            Client::new(self.options)
        } else {
            Client::scoped(self.options)
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
