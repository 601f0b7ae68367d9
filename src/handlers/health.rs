use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "activitylog-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ready once the database answers and both tables exist.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let tables = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM sqlite_master
        WHERE type = 'table' AND name IN ('ActivityTable', 'UserTable')
        "#,
    )
    .fetch_one(state.db.pool())
    .await;

    let (status, database, schema) = match tables {
        Ok(2) => (StatusCode::OK, "ok", "ok"),
        Ok(_) => (StatusCode::SERVICE_UNAVAILABLE, "ok", "missing"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "failed", "unknown")
        }
    };

    let ready = status == StatusCode::OK;
    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": { "database": database, "schema": schema },
        })),
    )
}
