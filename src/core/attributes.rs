//! Reserved attribute keys and their builders
//!
//! Each builder is pure: it takes typed values and returns an [`Attr`].
//! Arbitrary other keys can still be attached with [`Attr::new`].

use super::log_context::{Attr, FieldValue};

pub const KEY_CATEGORY: &str = "category";
pub const KEY_ACTION: &str = "action";
pub const KEY_USER: &str = "user";
pub const KEY_ERROR: &str = "error";
pub const KEY_EXTENDED: &str = "extended";

/// Bound to every event emitted through a client.
pub const KEY_HOSTNAME: &str = "hostname";

pub fn category(category: impl Into<String>) -> Attr {
    Attr::new(KEY_CATEGORY, category.into())
}

pub fn action(action: impl Into<String>) -> Attr {
    Attr::new(KEY_ACTION, action.into())
}

pub fn user(user: impl Into<String>) -> Attr {
    Attr::new(KEY_USER, user.into())
}

/// Attach an error by its display text.
pub fn error(err: &dyn std::error::Error) -> Attr {
    Attr::new(KEY_ERROR, FieldValue::Error(err.to_string()))
}

/// Extended context holding a single value.
pub fn extended(value: impl Into<FieldValue>) -> Attr {
    Attr::new(KEY_EXTENDED, value.into())
}

/// Extended context holding a nested group of attributes.
///
/// ```
/// use fanout_log::core::attributes::{extended_group, KEY_EXTENDED};
/// use fanout_log::Attr;
///
/// let attr = extended_group(vec![Attr::new("order", 42), Attr::new("retry", true)]);
/// assert_eq!(attr.key, KEY_EXTENDED);
/// ```
pub fn extended_group(attrs: impl IntoIterator<Item = Attr>) -> Attr {
    Attr::new(KEY_EXTENDED, FieldValue::Group(attrs.into_iter().collect()))
}

pub fn hostname(hostname: impl Into<String>) -> Attr {
    Attr::new(KEY_HOSTNAME, hostname.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_builders() {
        assert_eq!(category("auth"), Attr::new("category", "auth"));
        assert_eq!(action("login"), Attr::new("action", "login"));
        assert_eq!(user("alice"), Attr::new("user", "alice"));
    }

    #[test]
    fn test_error_builder_uses_display() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let attr = error(&err);
        assert_eq!(attr.key, KEY_ERROR);
        assert_eq!(attr.value, FieldValue::Error("no such file".to_string()));
    }

    #[test]
    fn test_extended_single_and_group() {
        assert_eq!(extended(5).value, FieldValue::Int(5));

        let attr = extended_group(vec![Attr::new("a", 1), Attr::new("b", "two")]);
        assert_eq!(
            attr.value.to_json_value(),
            serde_json::json!({"a": 1, "b": "two"})
        );
    }
}
