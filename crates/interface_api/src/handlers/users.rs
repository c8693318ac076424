//! User profile handlers

use axum::extract::State;
use axum::{Extension, Json};
use tracing::info;

use crate::auth::Claims;
use crate::dto::users::{EnsureUserRequest, UserResponse};
use crate::error::ApiError;
use crate::AppState;

/// Ensures a profile row exists for the authenticated user
pub async fn ensure_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<EnsureUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = request.email.or_else(|| claims.email.clone());
    let profile = state.users.upsert(&claims.sub, email).await;

    info!(user = %claims.sub, "User ensured");

    Ok(Json(UserResponse {
        subject: profile.subject,
        email: profile.email,
        created_at: profile.created_at,
    }))
}

/// Returns the authenticated user's profile
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>, ApiError> {
    let profile = state
        .users
        .get(&claims.sub)
        .await
        .map_err(|_| ApiError::NotFound("User profile not found".to_string()))?;

    Ok(Json(UserResponse {
        subject: profile.subject,
        email: profile.email,
        created_at: profile.created_at,
    }))
}
