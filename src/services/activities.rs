//! Activity queries and reminder reconciliation.
//!
//! Storage failures never escape these functions: each one logs the error
//! and degrades to `None`, an empty list, or a no-op.

use crate::db::{SqlParam, Storage};
use crate::models::activity::{Activity, NewActivity, PlannedRow, Reminder};

const INSERT_ACTIVITY: &str =
    "INSERT INTO ActivityTable (userId, activity, date, amount) VALUES (?, ?, ?, ?)";
const MOST_RECENT_ENTRY: &str =
    "SELECT * FROM ActivityTable WHERE userId = ? ORDER BY rowIdNum DESC LIMIT 1";
const SIMILAR_IN_RANGE: &str = r#"
    SELECT * FROM ActivityTable
    WHERE userId = ? AND activity = ? AND date BETWEEN ? AND ?
    ORDER BY date ASC, rowIdNum ASC
"#;
const DUMP_ALL: &str = "SELECT * FROM ActivityTable ORDER BY rowIdNum ASC";

// SQLite fills bare columns from the row that produced MAX(date)
const MOST_RECENT_PLANNED: &str = r#"
    SELECT rowIdNum, activity, MAX(date) AS maxDate, amount
    FROM ActivityTable
    WHERE userId = ? AND amount <= 0 AND date BETWEEN ? AND ?
"#;
const DELETE_PLANNED: &str =
    "DELETE FROM ActivityTable WHERE userId = ? AND amount <= 0 AND date BETWEEN ? AND ?";

fn insert_params(activity: &NewActivity) -> [SqlParam; 4] {
    [
        activity.user_id.as_str().into(),
        activity.activity_type.as_str().into(),
        activity.date.into(),
        activity.kind.amount().into(),
    ]
}

pub async fn insert_activity(db: &Storage, activity: &NewActivity) {
    tracing::debug!(
        user_id = %activity.user_id,
        activity = %activity.activity_type,
        date = activity.date,
        amount = activity.kind.amount(),
        "Inserting activity"
    );

    if let Err(e) = db.execute(INSERT_ACTIVITY, &insert_params(activity)).await {
        tracing::error!(error = %e, user_id = %activity.user_id, "Failed to insert activity");
    }
}

/// Most recently *inserted* row for the user, regardless of its date.
pub async fn most_recent_entry(db: &Storage, user_id: &str) -> Option<Activity> {
    match db.query_one(MOST_RECENT_ENTRY, &[user_id.into()]).await {
        Ok(row) => row,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load most recent entry");
            None
        }
    }
}

/// Rows of exactly `activity_type` with `min <= date <= max`, oldest first.
pub async fn similar_in_range(
    db: &Storage,
    user_id: &str,
    activity_type: &str,
    min: i64,
    max: i64,
) -> Vec<Activity> {
    let params: [SqlParam; 4] = [user_id.into(), activity_type.into(), min.into(), max.into()];
    match db.query_all(SIMILAR_IN_RANGE, &params).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load activities in range");
            Vec::new()
        }
    }
}

pub async fn dump_all(db: &Storage) -> Vec<Activity> {
    match db.query_all(DUMP_ALL, &[]).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to dump ActivityTable");
            Vec::new()
        }
    }
}

/// The planned row with the latest date in `[min, max]`.
pub async fn most_recent_planned_in_range(
    db: &Storage,
    user_id: &str,
    min: i64,
    max: i64,
) -> Option<Reminder> {
    tracing::debug!(user_id = %user_id, min, max, "Looking up most recent planned activity");

    let params: [SqlParam; 3] = [user_id.into(), min.into(), max.into()];
    match db.query_one::<PlannedRow>(MOST_RECENT_PLANNED, &params).await {
        Ok(row) => row.and_then(PlannedRow::into_reminder),
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load planned activity");
            None
        }
    }
}

/// Delete every planned row in `[min, max]`. Returns how many went.
pub async fn delete_planned_in_range(db: &Storage, user_id: &str, min: i64, max: i64) -> u64 {
    let params: [SqlParam; 3] = [user_id.into(), min.into(), max.into()];
    match db.execute(DELETE_PLANNED, &params).await {
        Ok(deleted) => deleted,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to delete planned activities");
            0
        }
    }
}

/// Pick the latest due reminder, then sweep all due planned rows.
///
/// The sweep runs even when nothing was found. Read and delete are separate
/// statements, so two concurrent callers can both see the same reminder.
pub async fn resolve_due(db: &Storage, user_id: &str, now: i64) -> Option<Reminder> {
    let reminder = most_recent_planned_in_range(db, user_id, 0, now).await;
    let swept = delete_planned_in_range(db, user_id, 0, now).await;

    if swept > 0 {
        tracing::info!(user_id = %user_id, swept, "Resolved due planned activities");
    }

    reminder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema, wipe_all};
    use crate::models::activity::{ActivityKind, DateInput, RawActivity};
    use crate::services::normalize::normalize;
    use crate::time_utils::MS_IN_DAY;
    use sqlx::sqlite::SqlitePoolOptions;

    const D: i64 = 19_787 * MS_IN_DAY; // 2024-03-05

    async fn create_test_db() -> Storage {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        Storage::new(pool)
    }

    async fn insert(db: &Storage, user: &str, activity_type: &str, date: i64, amount: f64) {
        let activity = NewActivity {
            user_id: user.into(),
            activity_type: activity_type.into(),
            date,
            kind: ActivityKind::from_amount(amount),
        };
        insert_activity(db, &activity).await;
    }

    #[tokio::test]
    async fn test_most_recent_entry_uses_insertion_order() {
        let db = create_test_db().await;
        insert(&db, "u1", "run", D, 5.0).await;
        // Older date, inserted later
        insert(&db, "u1", "swim", D - 3 * MS_IN_DAY, 40.0).await;

        let latest = most_recent_entry(&db, "u1").await.unwrap();
        assert_eq!(latest.activity_type, "swim");
        assert_eq!(latest.date, D - 3 * MS_IN_DAY);
        assert_eq!(latest.amount, 40.0);
    }

    #[tokio::test]
    async fn test_normalized_activity_reads_back_as_most_recent() {
        let db = create_test_db().await;
        let raw = RawActivity {
            activity: " run ".into(),
            // 13:20 on the same day
            date: DateInput::Millis(D + 48_000_000),
            scalar: 5.0,
        };

        let activity = normalize("u1", &raw).unwrap();
        insert_activity(&db, &activity).await;

        let latest = most_recent_entry(&db, "u1").await.unwrap();
        assert_eq!(latest.user_id, "u1");
        assert_eq!(latest.activity_type, "run");
        assert_eq!(latest.date, D);
        assert_eq!(latest.amount, 5.0);
        assert_eq!(latest.kind(), ActivityKind::Completed(5.0));
    }

    #[tokio::test]
    async fn test_most_recent_entry_empty_is_none() {
        let db = create_test_db().await;
        insert(&db, "u2", "run", D, 5.0).await;
        assert!(most_recent_entry(&db, "u1").await.is_none());
    }

    #[tokio::test]
    async fn test_similar_in_range_filters_type_user_and_range() {
        let db = create_test_db().await;
        insert(&db, "u1", "run", D, 5.0).await;
        insert(&db, "u1", "run", D - MS_IN_DAY, 3.0).await;
        insert(&db, "u1", "walk", D, 1.0).await;
        insert(&db, "u2", "run", D, 9.0).await;
        insert(&db, "u1", "run", D + MS_IN_DAY, 7.0).await;
        insert(&db, "u1", "run", D - 2 * MS_IN_DAY, 2.0).await;

        let rows = similar_in_range(&db, "u1", "run", D - MS_IN_DAY, D).await;
        let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![3.0, 5.0]);
        assert!(rows.iter().all(|r| r.user_id == "u1" && r.activity_type == "run"));
    }

    #[tokio::test]
    async fn test_resolve_due_returns_planned_and_keeps_completed() {
        let db = create_test_db().await;
        insert(&db, "u1", "run", D, 5.0).await;
        insert(&db, "u1", "run", D, -1.0).await;

        let reminder = resolve_due(&db, "u1", D + 1).await.unwrap();
        assert_eq!(reminder.activity, "run");
        assert_eq!(reminder.date, D);
        assert_eq!(reminder.scalar, -1.0);

        let rows = similar_in_range(&db, "u1", "run", D, D).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind(), ActivityKind::Completed(5.0));
    }

    #[tokio::test]
    async fn test_resolve_due_is_idempotent() {
        let db = create_test_db().await;
        insert(&db, "u1", "yoga", D - 3 * MS_IN_DAY, -1.0).await;
        insert(&db, "u1", "yoga", D - 2 * MS_IN_DAY, -1.0).await;

        let first = resolve_due(&db, "u1", D).await.unwrap();
        assert_eq!(first.date, D - 2 * MS_IN_DAY);

        assert!(resolve_due(&db, "u1", D).await.is_none());
        assert!(most_recent_planned_in_range(&db, "u1", 0, D).await.is_none());
        assert!(dump_all(&db).await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_due_leaves_future_and_other_users() {
        let db = create_test_db().await;
        insert(&db, "u1", "run", D + 2 * MS_IN_DAY, -1.0).await;
        insert(&db, "u2", "run", D - MS_IN_DAY, -1.0).await;

        assert!(resolve_due(&db, "u1", D).await.is_none());

        let remaining = dump_all(&db).await;
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn test_wipe_empties_every_query() {
        let db = create_test_db().await;
        insert(&db, "u1", "run", D, 5.0).await;
        insert(&db, "u2", "swim", D, -1.0).await;

        wipe_all(&db).await.unwrap();

        assert!(dump_all(&db).await.is_empty());
        assert!(most_recent_entry(&db, "u1").await.is_none());
        assert!(similar_in_range(&db, "u1", "run", 0, i64::MAX).await.is_empty());
        assert!(resolve_due(&db, "u2", i64::MAX).await.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_degrades_to_empty() {
        // No schema: every statement fails
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Storage::new(pool);

        insert(&db, "u1", "run", D, 5.0).await;
        assert!(most_recent_entry(&db, "u1").await.is_none());
        assert!(similar_in_range(&db, "u1", "run", 0, D).await.is_empty());
        assert!(dump_all(&db).await.is_empty());
        assert!(resolve_due(&db, "u1", D).await.is_none());
    }
}
