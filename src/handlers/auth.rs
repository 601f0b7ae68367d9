use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::models::user::{User, UserProfile};
use crate::services::users;
use crate::AppState;

pub async fn me(Extension(auth_user): Extension<AuthUser>) -> Json<UserProfile> {
    Json(UserProfile {
        id: auth_user.id,
        name: auth_user.name,
    })
}

/// Unauthenticated user directory, only routed when debug routes are enabled.
pub async fn get_all_users(State(state): State<AppState>) -> Json<Vec<User>> {
    tracing::info!("Dumping UserTable");
    Json(users::list_users(&state.db).await)
}
