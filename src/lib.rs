use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Storage;

#[derive(Clone)]
pub struct AppState {
    pub db: Storage,
    pub config: Arc<Config>,
}

pub fn build_router(state: AppState) -> Router {
    let mut public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    if state.config.debug_routes {
        tracing::warn!("Debug routes enabled: /api/debug/* is unauthenticated");
        public_routes = public_routes
            .route("/api/debug/all", get(handlers::activities::get_all))
            .route("/api/debug/users", get(handlers::auth::get_all_users));
    }

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/activities", post(handlers::activities::post_activity))
        .route("/api/reminder", get(handlers::activities::get_reminder))
        .route("/api/week", get(handlers::activities::get_week))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let allowed_origins: Vec<HeaderValue> = match state.config.frontend_url.parse() {
        Ok(origin) => vec![origin],
        Err(_) => {
            tracing::warn!(
                frontend_url = %state.config.frontend_url,
                "Invalid FRONTEND_URL; CORS disabled"
            );
            Vec::new()
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
