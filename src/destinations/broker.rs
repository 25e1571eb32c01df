//! Message broker destination
//!
//! Publishes every serialized event to one fixed subject,
//! `log.<level>.<normalized hostname>`. Publishing is fire-and-forget: a
//! failed publish is returned to the fan-out writer and not retried here.
//! Reconnecting is the connection's job, driven by its [`ReconnectPolicy`].

use super::reconnect::ReconnectPolicy;
use crate::core::{Destination, Result};
use crate::normalize::normalize;
use std::sync::Arc;

/// A live publish/subscribe connection.
///
/// Implementations synchronize internally; `publish` may be called from
/// several threads at once.
pub trait BrokerConnection: Send + Sync {
    fn publish(&self, subject: &str, payload: &[u8]) -> Result<()>;

    /// Block until buffered publishes reached the server
    fn flush(&self) -> Result<()>;

    fn close(&self) -> Result<()>;
}

/// Opens broker connections from `nats://` style URIs.
pub trait BrokerConnector: Send + Sync {
    fn connect(&self, uri: &str, policy: &ReconnectPolicy) -> Result<Arc<dyn BrokerConnection>>;
}

/// Subject for events logged under `level_name` by `hostname`.
///
/// ```
/// use fanout_log::destinations::broker_subject;
///
/// assert_eq!(broker_subject("audit", "host one"), "log.audit.hostQ20one");
/// ```
pub fn broker_subject(level_name: &str, hostname: &str) -> String {
    format!("log.{}.{}", level_name, normalize(hostname))
}

pub struct BrokerDestination {
    connection: Arc<dyn BrokerConnection>,
    subject: String,
    name: String,
}

impl BrokerDestination {
    pub fn new(connection: Arc<dyn BrokerConnection>, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        Self {
            connection,
            name: format!("broker:{}", subject),
            subject,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn connection(&self) -> &Arc<dyn BrokerConnection> {
        &self.connection
    }
}

impl Destination for BrokerDestination {
    fn write_all(&self, buf: &[u8]) -> Result<()> {
        self.connection.publish(&self.subject, buf)
    }

    fn flush(&self) -> Result<()> {
        self.connection.flush()
    }

    /// The connection is shared and released by its owner; only flush here.
    fn close(&self) -> Result<()> {
        self.connection.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct Recording {
        published: Mutex<Vec<(String, Vec<u8>)>>,
        fail: AtomicBool,
        closed: AtomicBool,
    }

    impl BrokerConnection for Recording {
        fn publish(&self, subject: &str, payload: &[u8]) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(LoggerError::broker_publish(subject, "disconnected"));
            }
            self.published.lock().push((subject.to_string(), payload.to_vec()));
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn close(&self) -> Result<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_subject_derivation() {
        assert_eq!(broker_subject("audit", "host one"), "log.audit.hostQ20one");
        assert_eq!(broker_subject("AUDIT", "web1"), "log.AUDIT.web1");
        assert_eq!(
            broker_subject("debug", "db.internal"),
            "log.debug.dbQ2Einternal"
        );
    }

    #[test]
    fn test_publishes_to_fixed_subject() {
        let connection = Arc::new(Recording::default());
        let destination = BrokerDestination::new(connection.clone(), broker_subject("info", "a b"));

        destination.write_all(b"{}\n").unwrap();
        let published = connection.published.lock();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "log.info.aQ20b");
        assert_eq!(published[0].1, b"{}\n".to_vec());
    }

    #[test]
    fn test_publish_failure_is_returned_without_retry() {
        let connection = Arc::new(Recording::default());
        connection.fail.store(true, Ordering::SeqCst);
        let destination = BrokerDestination::new(connection.clone(), "log.audit.h");

        assert!(matches!(
            destination.write_all(b"x"),
            Err(LoggerError::BrokerPublish { .. })
        ));
        assert!(connection.published.lock().is_empty());
    }

    #[test]
    fn test_close_leaves_connection_open() {
        let connection = Arc::new(Recording::default());
        let destination = BrokerDestination::new(connection.clone(), "log.audit.h");

        destination.close().unwrap();
        assert!(!connection.closed.load(Ordering::SeqCst));
    }
}
