//! Seven-day activity totals ending on a given day.

use crate::db::Storage;
use crate::models::activity::{Activity, WeekBucket};
use crate::services::activities::{most_recent_entry, similar_in_range};
use crate::services::normalize::ValidationError;
use crate::time_utils::{day_start_ms, MS_IN_DAY};

pub const WEEK_DAYS: usize = 7;

/// Activity type used when the user has never logged anything.
pub const NO_ACTIVITY: &str = "none";

/// Sum `rows` into seven daily buckets, earliest day first.
///
/// A row lands `floor((end - date) / day)` days back from `end`; rows outside
/// the window are ignored.
pub fn bucket_amounts(rows: &[Activity], end_date: i64) -> Vec<WeekBucket> {
    let mut buckets: Vec<WeekBucket> = (0..WEEK_DAYS as i64)
        .rev()
        .map(|days_back| WeekBucket {
            date: end_date.saturating_sub(days_back * MS_IN_DAY),
            value: 0.0,
        })
        .collect();

    for row in rows {
        let days_back = end_date.saturating_sub(row.date).div_euclid(MS_IN_DAY);
        if !(0..WEEK_DAYS as i64).contains(&days_back) {
            continue;
        }
        let idx = WEEK_DAYS - 1 - days_back as usize;
        buckets[idx].value += row.amount;
    }

    buckets
}

/// First instant of the week ending at `end_date`, or `None` when `end_date`
/// is not a representable date.
pub fn week_start(end_date: i64) -> Option<i64> {
    day_start_ms(end_date)?;
    end_date.checked_sub((WEEK_DAYS as i64 - 1) * MS_IN_DAY)
}

/// Resolve the activity type for a week query: the caller's choice, else the
/// type of the user's most recently inserted activity, else [`NO_ACTIVITY`].
pub async fn resolve_activity_type(
    db: &Storage,
    user_id: &str,
    requested: Option<&str>,
) -> String {
    match requested {
        Some(activity_type) => activity_type.to_string(),
        None => most_recent_entry(db, user_id)
            .await
            .map(|a| a.activity_type)
            .unwrap_or_else(|| NO_ACTIVITY.to_string()),
    }
}

pub async fn week_buckets(
    db: &Storage,
    user_id: &str,
    activity_type: Option<&str>,
    end_date: i64,
) -> Result<Vec<WeekBucket>, ValidationError> {
    let start_date =
        week_start(end_date).ok_or_else(|| ValidationError::InvalidDate(end_date.to_string()))?;
    let activity_type = resolve_activity_type(db, user_id, activity_type).await;

    let rows = similar_in_range(db, user_id, &activity_type, start_date, end_date).await;
    tracing::debug!(
        user_id = %user_id,
        activity = %activity_type,
        rows = rows.len(),
        "Bucketing week"
    );

    Ok(bucket_amounts(&rows, end_date))
}
