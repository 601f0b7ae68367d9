//! Day-granularity helpers. Dates are epoch milliseconds; the canonical day
//! boundary is UTC midnight.

use chrono::{DateTime, NaiveDate, Utc};

pub const MS_IN_DAY: i64 = 86_400_000;

/// Truncate an epoch-ms timestamp to UTC midnight of the same day.
///
/// Returns `None` when `ms` lies outside the range chrono can represent.
pub fn day_start_ms(ms: i64) -> Option<i64> {
    DateTime::from_timestamp_millis(ms).map(|dt| date_to_ms(dt.date_naive()))
}

/// UTC midnight of `date`, in epoch ms.
pub fn date_to_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// UTC midnight of the current day.
pub fn today_ms() -> i64 {
    date_to_ms(Utc::now().date_naive())
}
