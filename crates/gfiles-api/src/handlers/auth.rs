//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use gfiles_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_repo
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

    let password_ok = state
        .password_hasher
        .verify_password(&req.password, &user.password_hash)?;
    if !password_ok {
        return Err(AppError::authentication("Invalid username or password").into());
    }

    let issued =
        state
            .jwt_encoder
            .generate_access_token(user.id, user.role, &user.username)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "access_token": issued.access_token,
            "expires_at": issued.expires_at,
            "user": user,
        }
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state
        .user_repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}
