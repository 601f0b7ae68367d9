use anyhow::Context;
use std::sync::Arc;

use activitylog_api::config::Config;
use activitylog_api::db::{self, Storage};
use activitylog_api::services::seed;
use activitylog_api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "activitylog_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to open database")?;
    db::ensure_schema(&pool)
        .await
        .context("Failed to create tables")?;
    let storage = Storage::new(pool);

    if let Some(seed_user) = config.seed_user_id.as_deref() {
        seed::seed_demo_data(&storage, seed_user, &config.seed_user_name)
            .await
            .context("Failed to seed demo data")?;
    }

    let state = AppState {
        db: storage,
        config: config.clone(),
    };
    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
