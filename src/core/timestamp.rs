//! Timestamp formatting for serialized events

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const RFC3339_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Timestamp representation used for the `time` field
///
/// # Examples
///
/// ```
/// use fanout_log::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Rfc3339Millis.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Rfc3339Millis,

    /// RFC 3339 in UTC with nanoseconds: `2025-01-08T10:30:45.123456789Z`
    Rfc3339Nanos,

    /// Unix timestamp in seconds, emitted as a JSON number
    Unix,

    /// Unix timestamp in milliseconds, emitted as a JSON number
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339Millis => datetime.format(RFC3339_MILLIS).to_string(),
            TimestampFormat::Rfc3339Nanos => datetime.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // An invalid pattern falls back to the default rendering
                let mut out = String::with_capacity(32);
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    return datetime.format(RFC3339_MILLIS).to_string();
                }
                out
            }
        }
    }

    /// Reject custom strftime patterns chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "timestamp_format",
                    format!("invalid strftime pattern '{}'", format_str),
                ));
            }
        }
        Ok(())
    }

    /// JSON value for the `time` field. Numeric formats stay numbers.
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => serde_json::Value::Number(datetime.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_millis_format() {
        let result = TimestampFormat::Rfc3339Millis.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_nanos_format() {
        let result = TimestampFormat::Rfc3339Nanos.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456000Z");
    }

    #[test]
    fn test_numeric_json_values() {
        let value = TimestampFormat::UnixMillis.to_json_value(&fixed_datetime());
        assert_eq!(value, serde_json::json!(1736332245123i64));

        let value = TimestampFormat::Unix.to_json_value(&fixed_datetime());
        assert!(value.is_number());

        let value = TimestampFormat::Rfc3339Millis.to_json_value(&fixed_datetime());
        assert!(value.is_string());
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
        assert!(!format.is_numeric());
    }

    #[test]
    fn test_invalid_custom_format_falls_back() {
        let format = TimestampFormat::Custom("%Q".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08T10:30:45.123Z");
        assert!(format.to_json_value(&fixed_datetime()).is_string());
    }

    #[test]
    fn test_validate() {
        assert!(TimestampFormat::Rfc3339Millis.validate().is_ok());
        assert!(TimestampFormat::Custom("%Y-%m-%d %H:%M".to_string())
            .validate()
            .is_ok());

        for pattern in ["%Q", "%Y-%"] {
            let result = TimestampFormat::Custom(pattern.to_string()).validate();
            assert!(matches!(
                result,
                Err(LoggerError::InvalidConfiguration { ref component, .. }) if component == "timestamp_format"
            ));
        }
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str("\"UnixMillis\"").expect("deserialize UnixMillis");
        assert_eq!(format, TimestampFormat::UnixMillis);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
