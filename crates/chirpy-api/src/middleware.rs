use std::sync::atomic::Ordering;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::AppState;
use crate::error::ApiError;

/// Caller identity proven by a valid `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub u64);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user_id = state.sessions.authenticate(token).map_err(|e| {
            warn!("Identity token rejected: {}", e);
            ApiError::from(e)
        })?;
        Ok(AuthUser(user_id))
    }
}

/// Webhook caller holding the payment provider's `Authorization: ApiKey` secret.
/// Checked from the headers alone, before any body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolkaCaller;

impl FromRequestParts<AppState> for PolkaCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if api_key(&parts.headers)? != state.polka_key {
            warn!("Webhook rejected: API key mismatch");
            return Err(ApiError::Unauthorized("invalid API key".into()));
        }
        Ok(PolkaCaller)
    }
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    authorization_value(headers, "Bearer ")
}

/// Key from `Authorization: ApiKey <key>`.
pub fn api_key(headers: &HeaderMap) -> Result<&str, ApiError> {
    authorization_value(headers, "ApiKey ")
}

fn authorization_value<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix(scheme))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing or malformed authorization header".into()))
}

/// Count every request that reaches the static file server.
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&with_auth("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_or_wrong_scheme() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&with_auth("Basic abc")).is_err());
        assert!(bearer_token(&with_auth("Bearer ")).is_err());
        assert!(api_key(&with_auth("Bearer abc")).is_err());
    }

    #[test]
    fn extracts_api_key() {
        assert_eq!(api_key(&with_auth("ApiKey f271c81f")).unwrap(), "f271c81f");
    }
}
