use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::services::users::get_or_create_user;
use crate::AppState;

/// The signed-in user, passed explicitly to every handler.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;
    let claims = token_data.claims;

    // First request after login creates the UserTable row
    let user = get_or_create_user(&state.db, &claims.sub, &claims.name)
        .await
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(user_id = %user.id, "Authenticated request");

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        name: user.name,
    });
    Ok(next.run(req).await)
}
