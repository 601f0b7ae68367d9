use crate::db::Storage;
use crate::models::user::User;

const INSERT_USER: &str = "INSERT INTO UserTable (id, name) VALUES (?, ?)";
const GET_USER: &str = "SELECT * FROM UserTable WHERE id = ? ORDER BY rowIdNum ASC LIMIT 1";
const ALL_USERS: &str = "SELECT * FROM UserTable ORDER BY rowIdNum ASC";

pub async fn get_user(db: &Storage, external_id: &str) -> Option<User> {
    match db.query_one(GET_USER, &[external_id.into()]).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, user_id = %external_id, "Failed to look up user");
            None
        }
    }
}

pub async fn create_user(db: &Storage, external_id: &str, name: &str) {
    tracing::info!(user_id = %external_id, "Adding user to UserTable");

    if let Err(e) = db
        .execute(INSERT_USER, &[external_id.into(), name.into()])
        .await
    {
        tracing::error!(error = %e, user_id = %external_id, "Failed to create user");
    }
}

/// First-login flow: look the user up and create the row if it is missing.
pub async fn get_or_create_user(db: &Storage, external_id: &str, name: &str) -> Option<User> {
    if let Some(user) = get_user(db, external_id).await {
        return Some(user);
    }

    create_user(db, external_id, name).await;
    get_user(db, external_id).await
}

pub async fn list_users(db: &Storage) -> Vec<User> {
    match db.query_all(ALL_USERS, &[]).await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list users");
            Vec::new()
        }
    }
}
