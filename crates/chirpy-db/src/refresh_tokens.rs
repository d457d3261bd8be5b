use chirpy_crypto::issue_identity_token;
use chrono::Utc;
use tracing::debug;

use crate::models::RefreshTokenRecord;
use crate::{Database, DbError};

impl Database {
    /// Set the user's one live refresh token, replacing any previous one.
    pub fn write_refresh_token(&self, user_id: u64, token: &str) -> Result<(), DbError> {
        let refresh_expiration = Utc::now() + self.refresh_ttl();

        self.with_doc_mut(|doc| {
            if !doc.users.contains_key(&user_id) {
                return Err(DbError::UserNotFound(user_id));
            }
            doc.refresh_tokens.insert(
                user_id,
                RefreshTokenRecord {
                    refresh_token: token.to_string(),
                    refresh_expiration,
                },
            );
            debug!("Refresh token issued for user {}", user_id);
            Ok(())
        })
    }

    /// Exchange a live refresh token for a fresh identity token (default TTL).
    pub fn resolve_refresh_token(&self, token: &str, secret: &str) -> Result<String, DbError> {
        let user_id = self.with_doc(|doc| {
            let (user_id, record) = doc
                .refresh_token_owner(token)
                .ok_or(DbError::NoValidToken)?;
            if !record.is_live(Utc::now()) {
                return Err(DbError::TokenExpired);
            }
            Ok(user_id)
        })?;

        Ok(issue_identity_token(user_id, secret, None)?)
    }

    /// Destroy a live refresh token.
    pub fn revoke_refresh_token(&self, token: &str) -> Result<(), DbError> {
        self.with_doc_mut(|doc| {
            let (user_id, record) = doc
                .refresh_token_owner(token)
                .ok_or(DbError::NoValidToken)?;
            if !record.is_live(Utc::now()) {
                return Err(DbError::TokenExpired);
            }
            doc.refresh_tokens.remove(&user_id);
            debug!("Refresh token revoked for user {}", user_id);
            Ok(())
        })
    }
}
