use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::activity::{Activity, RawActivity, Reminder, WeekBucket, WeekQuery};
use crate::services::{activities, normalize::normalize, weekly};
use crate::time_utils::{now_ms, today_ms};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Either the reminder that just came due, or an all-clear message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReminderResponse {
    Due(Reminder),
    UpToDate(MessageResponse),
}

pub async fn post_activity(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<RawActivity>,
) -> AppResult<Json<MessageResponse>> {
    let activity = normalize(&auth_user.id, &body)?;
    activities::insert_activity(&state.db, &activity).await;

    Ok(Json(MessageResponse {
        message: "Activity recorded".into(),
    }))
}

pub async fn get_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<ReminderResponse> {
    let response = match activities::resolve_due(&state.db, &auth_user.id, now_ms()).await {
        Some(reminder) => ReminderResponse::Due(reminder),
        None => ReminderResponse::UpToDate(MessageResponse {
            message: "All activities up to date!".into(),
        }),
    };
    Json(response)
}

/// Seven daily totals, most recent day first.
pub async fn get_week(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<Vec<WeekBucket>>> {
    let end_date = query.date.unwrap_or_else(today_ms);

    let mut buckets = weekly::week_buckets(
        &state.db,
        &auth_user.id,
        query.activity.as_deref(),
        end_date,
    )
    .await?;
    buckets.reverse();

    Ok(Json(buckets))
}

/// Unauthenticated full dump, only routed when debug routes are enabled.
pub async fn get_all(State(state): State<AppState>) -> Json<Vec<Activity>> {
    tracing::info!("Dumping ActivityTable");
    Json(activities::dump_all(&state.db).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_response_due_is_flat() {
        let resp = ReminderResponse::Due(Reminder {
            activity: "run".into(),
            date: 0,
            scalar: -1.0,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["activity"], "run");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_reminder_response_up_to_date() {
        let resp = ReminderResponse::UpToDate(MessageResponse {
            message: "All activities up to date!".into(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message"], "All activities up to date!");
    }
}
