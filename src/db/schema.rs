use sqlx::SqlitePool;

use super::storage::{Storage, StorageError};

/// Create both tables if absent. Runs once at startup; the schema is never migrated.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // An explicit rowIdNum keeps row ids stable across VACUUM
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ActivityTable (
            rowIdNum INTEGER PRIMARY KEY,
            userId TEXT,
            activity TEXT,
            date INTEGER,
            amount FLOAT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_activity_user_date ON ActivityTable(userId, date)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS UserTable (
            rowIdNum INTEGER PRIMARY KEY,
            id TEXT,
            name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ready");
    Ok(())
}

/// Delete every activity and user, then compact the file.
pub async fn wipe_all(storage: &Storage) -> Result<(), StorageError> {
    storage.execute("DELETE FROM ActivityTable", &[]).await?;
    storage.execute("DELETE FROM UserTable", &[]).await?;
    storage.execute("VACUUM", &[]).await?;
    tracing::warn!("Wiped ActivityTable and UserTable");
    Ok(())
}
