//! Process-wide default logger
//!
//! Lets any part of the process log without passing a [`Logger`] around.
//! Installing is a single swap and is expected to happen once, at start-up.
//! Components that want their own instance keep a `Logger` handle instead.

use super::log_context::{Attr, LogContext};
use super::log_level::LogLevel;
use super::logger::Logger;
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// Install `logger` as the process default, returning the previous one.
pub fn set_default(logger: Arc<Logger>) -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.write().replace(logger)
}

/// Remove the process default, returning it.
pub fn clear_default() -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.write().take()
}

/// Remove the process default only if it is `logger`.
pub fn clear_default_if(logger: &Arc<Logger>) -> bool {
    let mut current = DEFAULT_LOGGER.write();
    match current.as_ref() {
        Some(installed) if Arc::ptr_eq(installed, logger) => {
            *current = None;
            true
        }
        _ => false,
    }
}

pub fn default_logger() -> Option<Arc<Logger>> {
    DEFAULT_LOGGER.read().clone()
}

/// Log through the default logger. Does nothing when none is installed.
pub fn log(level: LogLevel, message: impl Into<String>) {
    if let Some(logger) = default_logger() {
        logger.log(level, message);
    }
}

pub fn log_with_context(level: LogLevel, message: impl Into<String>, context: LogContext) {
    if let Some(logger) = default_logger() {
        logger.log_with_context(level, message, context);
    }
}

pub fn log_attrs(level: LogLevel, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    if let Some(logger) = default_logger() {
        logger.log_attrs(level, message, attrs);
    }
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

pub fn audit(message: impl Into<String>) {
    log(LogLevel::Audit, message);
}

pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message);
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}
