use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use chirpy_crypto::CryptoError;
use chirpy_db::DbError;
use chirpy_types::api::ErrorResponse;

/// Handler error. Each variant is one HTTP status; the message becomes the
/// `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::ChirpNotFound(_) | DbError::UserNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            DbError::EmailTaken => ApiError::Conflict(e.to_string()),
            // Don't reveal which half of the credentials was wrong.
            DbError::NoSuchEmail | DbError::WrongPassword => {
                ApiError::Unauthorized("incorrect email or password".into())
            }
            DbError::NoValidToken | DbError::TokenExpired => {
                ApiError::Unauthorized(e.to_string())
            }
            DbError::Crypto(inner) => inner.into(),
            DbError::Io(_)
            | DbError::Corrupt(_)
            | DbError::LockPoisoned
            | DbError::IdSpaceExhausted => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<CryptoError> for ApiError {
    fn from(e: CryptoError) -> Self {
        if e.is_internal() {
            ApiError::Internal(e.to_string())
        } else {
            ApiError::Unauthorized(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Responding with {}: {}", status, self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Run blocking store/crypto work off the async runtime.
pub async fn blocking<F, T, E>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal("internal error".into())
        })?
        .map_err(Into::into)
}
