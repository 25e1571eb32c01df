//! Destination descriptors
//!
//! Configuration names destinations with plain strings. They are parsed once
//! into [`DestinationSpec`]; nothing downstream looks at the string again.

use crate::core::{LoggerError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const BROKER_SCHEME: &str = "nats://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationSpec {
    Stdout,
    Stderr,
    File(PathBuf),
    Broker(String),
}

impl DestinationSpec {
    /// Parse every descriptor, splitting comma separated lists. Duplicates
    /// are kept; each one becomes its own destination.
    pub fn parse_all<S: AsRef<str>>(descriptors: &[S]) -> Result<Vec<Self>> {
        descriptors
            .iter()
            .flat_map(|d| d.as_ref().split(','))
            .map(str::parse)
            .collect()
    }

    pub fn is_console(&self) -> bool {
        matches!(self, DestinationSpec::Stdout | DestinationSpec::Stderr)
    }
}

impl FromStr for DestinationSpec {
    type Err = LoggerError;

    /// `stdout` and `stderr` match case-insensitively. `nats://` URIs are
    /// brokers. Everything else is a file path, absolute (`/var/log/app.log`)
    /// or relative to the working directory.
    fn from_str(s: &str) -> Result<Self> {
        let descriptor = s.trim();

        if descriptor.is_empty() {
            return Err(LoggerError::invalid_destination(s, "empty descriptor"));
        }
        if descriptor.eq_ignore_ascii_case("stdout") {
            return Ok(DestinationSpec::Stdout);
        }
        if descriptor.eq_ignore_ascii_case("stderr") {
            return Ok(DestinationSpec::Stderr);
        }
        if let Some(rest) = descriptor.strip_prefix(BROKER_SCHEME) {
            if rest.is_empty() {
                return Err(LoggerError::invalid_destination(s, "broker URI has no host"));
            }
            return Ok(DestinationSpec::Broker(descriptor.to_string()));
        }
        Ok(DestinationSpec::File(PathBuf::from(descriptor)))
    }
}

impl fmt::Display for DestinationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationSpec::Stdout => f.write_str("stdout"),
            DestinationSpec::Stderr => f.write_str("stderr"),
            DestinationSpec::File(path) => write!(f, "{}", path.display()),
            DestinationSpec::Broker(uri) => f.write_str(uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_are_case_insensitive() {
        for input in ["stdout", "STDOUT", "StdOut"] {
            assert_eq!(input.parse::<DestinationSpec>().unwrap(), DestinationSpec::Stdout);
        }
        assert_eq!("STDERR".parse::<DestinationSpec>().unwrap(), DestinationSpec::Stderr);
    }

    #[test]
    fn test_file_and_broker() {
        assert_eq!(
            "/var/log/app.log".parse::<DestinationSpec>().unwrap(),
            DestinationSpec::File(PathBuf::from("/var/log/app.log"))
        );
        assert_eq!(
            "nats://127.0.0.1:4222".parse::<DestinationSpec>().unwrap(),
            DestinationSpec::Broker("nats://127.0.0.1:4222".to_string())
        );
    }

    #[test]
    fn test_broker_prefix_is_case_sensitive() {
        assert_eq!(
            "NATS://host".parse::<DestinationSpec>().unwrap(),
            DestinationSpec::File(PathBuf::from("NATS://host"))
        );
    }

    #[test]
    fn test_invalid_descriptors() {
        assert!(matches!(
            "  ".parse::<DestinationSpec>(),
            Err(LoggerError::InvalidDestination { .. })
        ));
        assert!("nats://".parse::<DestinationSpec>().is_err());
    }

    #[test]
    fn test_parse_all_splits_and_keeps_duplicates() {
        let specs = DestinationSpec::parse_all(&["stderr, /tmp/a.log", "stdout", "STDOUT"]).unwrap();
        assert_eq!(
            specs,
            vec![
                DestinationSpec::Stderr,
                DestinationSpec::File(PathBuf::from("/tmp/a.log")),
                DestinationSpec::Stdout,
                DestinationSpec::Stdout,
            ]
        );
    }

    #[test]
    fn test_display_round_trips() {
        let spec: DestinationSpec = "/tmp/x.log".parse().unwrap();
        assert_eq!(spec.to_string(), "/tmp/x.log");
        assert!(DestinationSpec::Stdout.is_console());
    }
}
