//! Timestamp helpers.
//!
//! Issue timestamps are rendered as RFC3339 UTC with millisecond precision
//! and a `Z` suffix (`2025-01-15T12:00:00.123Z`). Values are truncated to
//! milliseconds when taken so that the stored value and its rendering agree,
//! which keeps string-typed filtering on `created_on`/`updated_on` exact.

use chrono::{DateTime, DurationRound, SecondsFormat, TimeDelta, Utc};

/// Current time truncated to whole milliseconds.
#[must_use]
pub fn now_millis() -> DateTime<Utc> {
    truncate_millis(Utc::now())
}

/// Truncate a timestamp to whole milliseconds.
#[must_use]
pub fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(ts)
}

/// Render a timestamp in the wire format.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for wire-format timestamps.
pub mod wire_format {
    use super::format_timestamp;
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(ts))
    }
}
