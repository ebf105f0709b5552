//! Time utilities for the identity locker.
//!
//! Credential timestamps are UTC ISO-8601 strings with a `Z` suffix,
//! truncated to whole seconds. Anchor receipts use Unix epoch seconds.

use chrono::{DateTime, Utc};

/// Return the current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a UTC time as ISO-8601 with `Z` suffix and second precision.
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Return the current time as seconds since Unix epoch.
pub fn unix_seconds() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
