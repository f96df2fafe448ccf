//! # Time Utilities
//!
//! Clock access and millisecond conversions used for persisted timestamps.

use chrono::{DateTime, Utc};

/// Get current UTC time, truncated to millisecond precision.
///
/// Stores keep timestamps as Unix milliseconds, so values handed to them are
/// truncated up front and read back unchanged.
pub fn now_utc() -> DateTime<Utc> {
    let now = Utc::now();
    from_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Convert Unix milliseconds back to a UTC timestamp.
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
