//! Log level definitions
//!
//! Levels sit on an integer scale with gaps between the standard levels so
//! custom levels can be interleaved. `Audit` lives between `Info` and `Warn`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i8)]
pub enum LogLevel {
    Debug = -4,
    Info = 0,
    #[default]
    Audit = 2,
    Warn = 4,
    Error = 8,
}

/// Custom level names, consulted before the standard parser.
pub const CUSTOM_LEVELS: &[(LogLevel, &str)] = &[(LogLevel::Audit, "AUDIT")];

impl LogLevel {
    /// Numeric severity; comparisons between levels use this value only.
    #[inline]
    pub const fn value(self) -> i8 {
        self as i8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Audit => "AUDIT",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Rendered level name. Custom levels use their table entry.
    pub fn name(&self) -> &'static str {
        CUSTOM_LEVELS
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, name)| *name)
            .unwrap_or_else(|| self.to_str())
    }

    /// Resolve a human supplied level name.
    ///
    /// Custom names win over the standard parser. Input that neither
    /// recognizes (including the empty string) resolves to [`LogLevel::Audit`],
    /// so a bad level never prevents logging from being set up.
    ///
    /// ```
    /// use fanout_log::LogLevel;
    ///
    /// assert_eq!(LogLevel::resolve("Debug"), LogLevel::Debug);
    /// assert_eq!(LogLevel::resolve("audit"), LogLevel::Audit);
    /// assert_eq!(LogLevel::resolve("not-a-level"), LogLevel::Audit);
    /// ```
    pub fn resolve(name: &str) -> Self {
        let name = name.trim();
        if let Some((level, _)) = CUSTOM_LEVELS
            .iter()
            .find(|(_, custom)| custom.eq_ignore_ascii_case(name))
        {
            return *level;
        }
        name.parse().unwrap_or(LogLevel::Audit)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Standard levels only; custom names go through [`LogLevel::resolve`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(LogLevel::resolve(&name))
    }
}
