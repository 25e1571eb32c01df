//! Log file names built from a layout
//!
//! `{user}` is replaced with the current user name, then the layout is
//! formatted as a strftime pattern in local time:
//!
//! `/var/log/messenger-{user}-%Y-%m.log` becomes
//! `/var/log/messenger-root-2025-01.log`.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write;

pub const USER_TOKEN: &str = "{user}";

/// Current user name from the environment, or `unknown`.
pub fn current_user() -> String {
    ["USER", "LOGNAME", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn log_file_name(layout: &str) -> String {
    log_file_name_at(layout, &current_user(), &Local::now())
}

/// Deterministic form of [`log_file_name`].
///
/// An invalid strftime pattern falls back to the layout with only the user
/// substituted.
pub fn log_file_name_at<Tz>(layout: &str, user: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    // A '%' in the user name must not be read as a format directive
    let escaped_user = user.replace('%', "%%");
    let pattern = layout.replace(USER_TOKEN, &escaped_user);

    let mut out = String::with_capacity(pattern.len() + 8);
    if write!(out, "{}", now.format(&pattern)).is_err() {
        return layout.replace(USER_TOKEN, user);
    }
    out
}
