//! Timestamp helpers

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Current time as an RFC3339 string (`2024-01-01T00:00:00.000Z`)
///
/// All persisted timestamps use this format; it sorts lexicographically.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// RFC3339 string for a moment `minutes` from now
pub fn minutes_from_now_rfc3339(minutes: i64) -> String {
    (Utc::now() + Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether an RFC3339 timestamp lies in the past
///
/// Unparseable timestamps count as expired.
pub fn is_past(rfc3339: &str) -> bool {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(t) => t < Utc::now(),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_not_past() {
        assert!(!is_past(&minutes_from_now_rfc3339(5)));
        assert!(is_past(&minutes_from_now_rfc3339(-5)));
    }

    #[test]
    fn test_garbage_counts_as_expired() {
        assert!(is_past("not-a-timestamp"));
    }
}
