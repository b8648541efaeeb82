//! Snapshot description composition.
//!
//! A rotatable snapshot carries a three-field description:
//! `"{base} {YYYY-MM-DD HH:MM:SS} {marker}"`. The trailing marker is what
//! the rotator matches on later, so the composition here and the suffix
//! filter in [`crate::rotator`] must agree.

use chrono::{TimeZone, Utc};

/// Timestamp layout embedded in snapshot descriptions.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a Unix timestamp as UTC `YYYY-MM-DD HH:MM:SS`.
///
/// Falls back to the raw number for timestamps chrono cannot represent.
pub fn format_timestamp(unix_sec: u64) -> String {
    i64::try_from(unix_sec)
        .ok()
        .and_then(|sec| Utc.timestamp_opt(sec, 0).single())
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| unix_sec.to_string())
}

/// Compose a snapshot description from its three space-joined fields.
///
/// The marker is embedded verbatim; no escaping or normalization.
pub fn build_description(base: &str, unix_sec: u64, marker: &str) -> String {
    format!("{} {} {}", base, format_timestamp(unix_sec), marker)
}
