//! Property-based tests for fanout_log using proptest

use fanout_log::destinations::broker_subject;
use fanout_log::normalize::{denormalize, normalize};
use fanout_log::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Audit),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

// ============================================================================
// Normalization Tests
// ============================================================================

proptest! {
    #[test]
    fn test_normalize_roundtrip(input in ".*") {
        prop_assert_eq!(denormalize(&normalize(&input)), input);
    }

    /// Output only uses the subject-safe alphabet
    #[test]
    fn test_normalize_alphabet(input in ".*") {
        let normalized = normalize(&input);
        prop_assert!(normalized.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_normalize_is_identity_on_safe_input(input in "[a-zA-PR-Z0-9]*") {
        prop_assert_eq!(normalize(&input), input);
    }

    /// Every Q in the output starts an escape
    #[test]
    fn test_every_q_is_an_escape(input in ".*") {
        let normalized = normalize(&input);
        let bytes = normalized.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'Q' {
                prop_assert!(i + 2 < bytes.len());
                prop_assert!(bytes[i + 1].is_ascii_hexdigit());
                prop_assert!(bytes[i + 2].is_ascii_hexdigit());
            }
        }
    }

    #[test]
    fn test_subject_has_three_tokens(level in any_level(), hostname in ".*") {
        let subject = broker_subject(level.name(), &hostname);
        let tokens: Vec<&str> = subject.split('.').collect();
        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[0], "log");
        prop_assert_eq!(tokens[1], level.name());
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    #[test]
    fn test_level_name_resolves_back(level in any_level()) {
        prop_assert_eq!(LogLevel::resolve(level.name()), level);
        prop_assert_eq!(LogLevel::resolve(&level.name().to_lowercase()), level);
    }

    /// Unknown names fall back to the audit level
    #[test]
    fn test_resolve_is_total(name in ".*") {
        let level = LogLevel::resolve(&name);
        let known = ["DEBUG", "INFO", "AUDIT", "WARN", "WARNING", "ERROR"];
        if !known.contains(&name.trim().to_uppercase().as_str()) {
            prop_assert_eq!(level, LogLevel::Audit);
        }
    }

    #[test]
    fn test_level_ordering_follows_value(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, a.value() < b.value());
        prop_assert_eq!(a == b, a.value() == b.value());
    }

    #[test]
    fn test_level_json_serialization(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", level.name()));
        let back: LogLevel = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, level);
    }
}

// ============================================================================
// Event Tests
// ============================================================================

proptest! {
    /// Any message becomes exactly one JSON line
    #[test]
    fn test_message_is_single_line(message in ".*") {
        let entry = LogEntry::new(LogLevel::Audit, message.clone());
        let bytes = JsonFormatter::new().format(&entry, &[]).unwrap();

        prop_assert_eq!(bytes.last(), Some(&b'\n'));
        prop_assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 1);

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(value["msg"].as_str(), Some(message.as_str()));
    }

    #[test]
    fn test_attributes_survive_serialization(key in "[a-z]{1,12}", value in any::<i64>()) {
        prop_assume!(!["time", "level", "msg", "source"].contains(&key.as_str()));
        let entry = LogEntry::new(LogLevel::Warn, "m")
            .with_context(LogContext::new().with_field(key.clone(), value));
        let bytes = JsonFormatter::new().format(&entry, &[]).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        prop_assert_eq!(parsed[key.as_str()].as_i64(), Some(value));
    }
}
