use axum::{Json, extract::State, http::StatusCode};

use chirpy_types::api::{CreateUserRequest, UpdateUserRequest};
use chirpy_types::models::User;

use crate::AppState;
use crate::error::{ApiError, blocking};
use crate::middleware::AuthUser;

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest("email and password are required".into()));
    }
    Ok(())
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    require_credentials(&req.email, &req.password)?;

    let user = blocking(move || state.db.create_user(&req.email, &req.password)).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users: replace the caller's own email and password.
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    require_credentials(&req.email, &req.password)?;

    let user =
        blocking(move || state.db.update_user(user_id, &req.email, &req.password)).await?;

    Ok(Json(user.into()))
}
