use std::sync::Arc;

use activitylog_api::auth::jwt::create_access_token;
use activitylog_api::config::Config;
use activitylog_api::db::{ensure_schema, Storage};
use activitylog_api::{build_router, AppState};
use axum::body::Body;
use axum::http::{header, Request, Response};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;

/// Router plus state over a fresh in-memory database.
pub async fn create_test_app() -> (axum::Router, AppState) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    ensure_schema(&pool).await.expect("Failed to create tables");

    let state = AppState {
        db: Storage::new(pool),
        config: Arc::new(Config::test_default()),
    };
    (build_router(state.clone()), state)
}

pub fn bearer(state: &AppState, external_id: &str, name: &str) -> String {
    let token = create_access_token(external_id, name, &state.config).expect("token");
    format!("Bearer {}", token)
}

pub fn get(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, auth: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
