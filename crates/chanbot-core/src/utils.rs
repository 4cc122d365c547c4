use std::time::Duration;

use chrono::Utc;

// ============== Timestamp Helpers ==============

/// RFC3339 timestamp in UTC (request stamps, logs).
pub fn iso_timestamp_utc() -> String {
    Utc::now().to_rfc3339()
}

// ============== Duration Helpers ==============

/// `Duration` from milliseconds where `0` means "disabled".
pub fn optional_millis(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}
