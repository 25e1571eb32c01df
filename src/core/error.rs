//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Log file could not be opened or created
    #[error("Failed to open log file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Initial broker connection failed
    #[error("Failed to connect to broker '{uri}': {message}")]
    BrokerConnect { uri: String, message: String },

    /// Publishing to a broker subject failed
    #[error("Failed to publish to '{subject}': {message}")]
    BrokerPublish { subject: String, message: String },

    /// Destination descriptor could not be parsed
    #[error("Invalid destination '{descriptor}': {message}")]
    InvalidDestination { descriptor: String, message: String },

    /// Write attempted on a destination that was already released
    #[error("Destination '{name}' is closed")]
    DestinationClosed { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn broker_connect(uri: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::BrokerConnect {
            uri: uri.into(),
            message: message.into(),
        }
    }

    pub fn broker_publish(subject: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::BrokerPublish {
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn invalid_destination(descriptor: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidDestination {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }

    pub fn destination_closed(name: impl Into<String>) -> Self {
        LoggerError::DestinationClosed { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
