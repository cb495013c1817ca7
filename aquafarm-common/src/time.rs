//! Timestamp utilities
//!
//! The journal stores all dates as integer seconds since the Unix epoch.

use chrono::{DateTime, Utc};

/// Get current Unix timestamp (seconds)
pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

/// Format a journal timestamp as `YYYY-MM-DD HH:MM:SS` UTC
///
/// Out-of-range values render as the raw integer rather than panicking.
pub fn format_ts(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ts_is_reasonable() {
        let ts = now_ts();
        // After 2000-01-01 and before 2100-01-01
        assert!(ts > 946_684_800);
        assert!(ts < 4_102_444_800);
    }

    #[test]
    fn test_format_ts_epoch() {
        assert_eq!(format_ts(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_ts_known_value() {
        // 2024-03-01 12:30:00 UTC
        assert_eq!(format_ts(1_709_296_200), "2024-03-01 12:30:00");
    }

    #[test]
    fn test_format_ts_out_of_range_falls_back() {
        assert_eq!(format_ts(i64::MAX), i64::MAX.to_string());
    }
}
