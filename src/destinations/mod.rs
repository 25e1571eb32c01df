//! Destination implementations

pub mod broker;
pub mod file;
#[cfg(feature = "nats")]
pub mod nats;
pub mod reconnect;
pub mod stream;

pub use broker::{broker_subject, BrokerConnection, BrokerConnector, BrokerDestination};
pub use file::FileDestination;
#[cfg(feature = "nats")]
pub use nats::{NatsConnection, NatsConnector};
pub use reconnect::ReconnectPolicy;
pub use stream::StreamDestination;

pub use crate::core::Destination;
