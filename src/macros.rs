//! Logging macros with `format!` style arguments.
//!
//! Each macro records the call site, which the formatter writes as the
//! `source` field when source recording is enabled.
//!
//! # Examples
//!
//! ```
//! use fanout_log::prelude::*;
//! use fanout_log::audit;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .destination(Arc::new(StreamDestination::stderr()))
//!     .build();
//!
//! let user = "alice";
//! audit!(logger, "password changed for {}", user);
//! ```

/// Log at an explicit level.
///
/// ```
/// # use fanout_log::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanout_log::log;
/// log!(logger, LogLevel::Warn, "queue depth {}", 1200);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at($level, format!($($arg)+), file!(), line!(), module_path!())
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log at the audit level, which passes the default filter.
#[macro_export]
macro_rules! audit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Audit, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
