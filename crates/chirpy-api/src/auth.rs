use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use chirpy_types::api::{LoginRequest, LoginResponse, TokenResponse};

use crate::AppState;
use crate::error::{ApiError, blocking};
use crate::middleware::bearer_token;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let resp = blocking(move || {
        state
            .sessions
            .login(&req.email, &req.password, req.expires_in_seconds)
    })
    .await?;

    Ok(Json(resp))
}

/// POST /api/refresh: `Authorization: Bearer <refresh token>`.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let refresh_token = bearer_token(&headers)?.to_owned();
    let token = blocking(move || state.sessions.refresh(&refresh_token)).await?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke: `Authorization: Bearer <refresh token>`.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = bearer_token(&headers)?.to_owned();
    blocking(move || state.sessions.revoke(&refresh_token)).await?;

    Ok(StatusCode::NO_CONTENT)
}
