//! Time helpers
//!
//! All persisted instants are Unix timestamps in milliseconds (UTC).

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix milliseconds to a UTC calendar date
pub fn date_of(millis: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .date_naive()
}

/// UTC midnight of the day containing `millis`, as Unix milliseconds
pub fn day_start_millis(millis: i64) -> i64 {
    date_of(millis)
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(millis)
}

/// Whole-day difference `to - from` on the UTC calendar
///
/// 0 means the same day; positive means `to` is in the future.
pub fn day_diff(from_millis: i64, to_millis: i64) -> i64 {
    (date_of(to_millis) - date_of(from_millis)).num_days()
}

/// First day of the month containing `millis`, as Unix milliseconds
pub fn month_start_millis(millis: i64) -> i64 {
    let date = date_of(millis);
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(millis)
}

/// Format `millis` as an ISO day label ("2025-06-01")
pub fn day_label(millis: i64) -> String {
    date_of(millis).format("%Y-%m-%d").to_string()
}

/// Format `millis` as a month label ("2025-06")
pub fn month_label(millis: i64) -> String {
    date_of(millis).format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn test_day_start() {
        let noon = 1_700_000_000_000; // mid-day UTC
        let start = day_start_millis(noon);
        assert!(start <= noon);
        assert_eq!(start % DAY_MS, 0);
        assert_eq!(day_start_millis(start), start);
    }

    #[test]
    fn test_day_diff_same_day() {
        let t = 1_700_000_000_000;
        assert_eq!(day_diff(t, t + 3_600_000), 0);
    }

    #[test]
    fn test_day_diff_across_days() {
        let t = day_start_millis(1_700_000_000_000);
        assert_eq!(day_diff(t, t + DAY_MS), 1);
        assert_eq!(day_diff(t + DAY_MS, t), -1);
        assert_eq!(day_diff(t, t + 5 * DAY_MS + 1), 5);
    }

    #[test]
    fn test_labels() {
        // 2023-11-14T22:13:20Z
        let t = 1_700_000_000_000;
        assert_eq!(day_label(t), "2023-11-14");
        assert_eq!(month_label(t), "2023-11");
    }
}
