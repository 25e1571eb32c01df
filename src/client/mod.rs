//! Logging client
//!
//! Turns [`ClientOptions`] into a running logger: resolves every
//! destination descriptor, opens the files and broker connections it needs,
//! builds the fan-out writer and the JSON front-end, binds the hostname and
//! (for [`Client::new`]) installs the result as the process default.
//!
//! The client owns every file handle and broker connection it opened and
//! releases them in [`Client::close`].

pub mod destination_spec;
pub mod options;

pub use destination_spec::DestinationSpec;
pub use options::{ClientBuilder, ClientOptions};

use crate::core::{
    attributes, global, Destination, DeliveryMetrics, JsonFormatter, LogLevel, Logger,
    LoggerError, Result, WorkerPool,
};
use crate::destinations::{
    broker_subject, BrokerConnection, BrokerConnector, BrokerDestination, FileDestination,
    ReconnectPolicy, StreamDestination,
};
use std::sync::Arc;

/// A resource opened by the client and released on close
enum OwnedResource {
    File(Arc<dyn Destination>),
    Broker {
        uri: String,
        connection: Arc<dyn BrokerConnection>,
    },
}

impl OwnedResource {
    /// Brokers are flushed, then closed even if the flush failed.
    fn release(&self) -> Result<()> {
        match self {
            OwnedResource::File(file) => file.close(),
            OwnedResource::Broker { connection, .. } => {
                let flushed = connection.flush();
                let closed = connection.close();
                flushed.and(closed)
            }
        }
    }

    fn describe(&self) -> &str {
        match self {
            OwnedResource::File(file) => file.name(),
            OwnedResource::Broker { uri, .. } => uri,
        }
    }
}

/// Release in open order; every resource is attempted, the first error wins.
fn release_all(resources: &[OwnedResource]) -> Result<()> {
    let mut first_error = None;
    for resource in resources {
        if let Err(e) = resource.release() {
            eprintln!(
                "[LOGGER ERROR] Failed to release {}: {}",
                resource.describe(),
                e
            );
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

pub struct Client {
    logger: Arc<Logger>,
    hostname: String,
    level_name: String,
    level: LogLevel,
    resources: Vec<OwnedResource>,
    closed: bool,
}

impl Client {
    /// Build a client and install it as the process default logger.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let client = Self::scoped(options)?;
        global::set_default(Arc::clone(&client.logger));
        Ok(client)
    }

    /// Build a client without touching the process default.
    ///
    /// If any destination fails to open, everything opened so far is
    /// released and the error is returned. Invalid options are rejected
    /// before anything is opened.
    pub fn scoped(options: ClientOptions) -> Result<Self> {
        options.timestamp_format.validate()?;

        let level_name = options.level_name().to_string();
        let level = options.min_level();
        let hostname = options.resolved_hostname();

        let mut specs = DestinationSpec::parse_all(&options.destinations)?;
        if specs.is_empty() {
            specs.push(DestinationSpec::Stderr);
        }

        let mut opener = Opener::new(&options, &level_name, &hostname);
        let mut destinations: Vec<Arc<dyn Destination>> = Vec::with_capacity(specs.len());
        for spec in &specs {
            match opener.open(spec) {
                Ok(destination) => destinations.push(destination),
                Err(e) => {
                    // Report the open failure, not a cleanup failure
                    let _ = release_all(&opener.resources);
                    return Err(e);
                }
            }
        }

        let formatter = JsonFormatter::new()
            .with_timestamp_format(options.timestamp_format.clone())
            .with_source(options.add_source);

        let logger = Logger::builder()
            .min_level(level)
            .destinations(destinations)
            .formatter(formatter)
            .attr(attributes::hostname(hostname.clone()))
            .workers(options.fanout_workers.unwrap_or_else(WorkerPool::default_size))
            .write_deadline(options.write_deadline())
            .build();

        Ok(Self {
            logger: Arc::new(logger),
            hostname,
            level_name,
            level,
            resources: opener.resources,
            closed: false,
        })
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Handle for dependency-injected use
    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.logger)
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Level name as configured, used in broker subjects
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn destination_count(&self) -> usize {
        self.logger.writer().len()
    }

    pub fn destination_names(&self) -> Vec<String> {
        self.logger
            .writer()
            .destinations()
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &DeliveryMetrics {
        self.logger.metrics()
    }

    /// Flush all destinations and release owned files and broker
    /// connections in the order they were opened.
    ///
    /// Every resource is attempted; the first error is returned. If this
    /// client is the process default it is uninstalled first.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        global::clear_default_if(&self.logger);

        // Console streams are not owned, but substitutes may buffer
        let flushed = self.logger.flush();
        let released = release_all(&self.resources);
        released.and(flushed)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            eprintln!("[LOGGER ERROR] Failed to release client resources on drop: {}", e);
        }
    }
}

/// Resolves specs into destinations, remembering what it opened
struct Opener<'a> {
    options: &'a ClientOptions,
    subject: String,
    reconnect: &'a ReconnectPolicy,
    stdout: Option<Arc<StreamDestination>>,
    stderr: Option<Arc<StreamDestination>>,
    resources: Vec<OwnedResource>,
}

impl<'a> Opener<'a> {
    fn new(options: &'a ClientOptions, level_name: &str, hostname: &str) -> Self {
        Self {
            options,
            subject: broker_subject(level_name, hostname),
            reconnect: &options.reconnect,
            stdout: options.stdout.clone(),
            stderr: options.stderr.clone(),
            resources: Vec::new(),
        }
    }

    fn open(&mut self, spec: &DestinationSpec) -> Result<Arc<dyn Destination>> {
        match spec {
            // One shared destination per console stream
            DestinationSpec::Stdout => {
                let stream: Arc<dyn Destination> = self
                    .stdout
                    .get_or_insert_with(|| Arc::new(StreamDestination::stdout()))
                    .clone();
                Ok(stream)
            }
            DestinationSpec::Stderr => {
                let stream: Arc<dyn Destination> = self
                    .stderr
                    .get_or_insert_with(|| Arc::new(StreamDestination::stderr()))
                    .clone();
                Ok(stream)
            }
            DestinationSpec::File(path) => {
                let file: Arc<dyn Destination> = Arc::new(FileDestination::open(path)?);
                self.resources.push(OwnedResource::File(Arc::clone(&file)));
                Ok(file)
            }
            DestinationSpec::Broker(uri) => {
                let connector = self.connector(uri)?;
                let connection = connector.connect(uri, self.reconnect)?;
                self.resources.push(OwnedResource::Broker {
                    uri: uri.clone(),
                    connection: Arc::clone(&connection),
                });
                Ok(Arc::new(BrokerDestination::new(connection, self.subject.clone())))
            }
        }
    }

    fn connector(&self, uri: &str) -> Result<Arc<dyn BrokerConnector>> {
        if let Some(ref connector) = self.options.connector {
            return Ok(Arc::clone(connector));
        }
        default_connector().ok_or_else(|| {
            LoggerError::invalid_destination(uri, "broker support is not compiled in")
        })
    }
}

#[cfg(feature = "nats")]
fn default_connector() -> Option<Arc<dyn BrokerConnector>> {
    Some(Arc::new(crate::destinations::NatsConnector::new()))
}

#[cfg(not(feature = "nats"))]
fn default_connector() -> Option<Arc<dyn BrokerConnector>> {
    None
}
