//! NATS-backed broker connection

use super::broker::{BrokerConnection, BrokerConnector};
use super::reconnect::ReconnectPolicy;
use crate::core::{LoggerError, Result};
use std::sync::Arc;

/// Connects through the `nats` client, configured from a [`ReconnectPolicy`].
#[derive(Debug, Clone, Default)]
pub struct NatsConnector {
    /// Optional client name shown in server monitoring
    pub client_name: Option<String>,
}

impl NatsConnector {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }
}

impl BrokerConnector for NatsConnector {
    fn connect(&self, uri: &str, policy: &ReconnectPolicy) -> Result<Arc<dyn BrokerConnection>> {
        let backoff = policy.clone();
        let mut options = nats::Options::new()
            .max_reconnects(policy.max_reconnects)
            .reconnect_delay_callback(move |attempt| backoff.delay_for(attempt));

        if policy.retry_on_failed_connect {
            options = options.retry_on_failed_connect();
        }
        if let Some(ref name) = self.client_name {
            options = options.with_name(name);
        }

        let connection = options
            .connect(uri)
            .map_err(|e| LoggerError::broker_connect(uri, e.to_string()))?;

        Ok(Arc::new(NatsConnection {
            uri: uri.to_string(),
            connection,
        }))
    }
}

pub struct NatsConnection {
    uri: String,
    connection: nats::Connection,
}

impl NatsConnection {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl BrokerConnection for NatsConnection {
    fn publish(&self, subject: &str, payload: &[u8]) -> Result<()> {
        self.connection
            .publish(subject, payload)
            .map_err(|e| LoggerError::broker_publish(subject, e.to_string()))
    }

    fn flush(&self) -> Result<()> {
        self.connection.flush().map_err(|e| {
            LoggerError::io_operation("flushing broker connection", self.uri.clone(), e)
        })
    }

    fn close(&self) -> Result<()> {
        // Connection handles share one client; closing any of them closes it
        self.connection.clone().close();
        Ok(())
    }
}
