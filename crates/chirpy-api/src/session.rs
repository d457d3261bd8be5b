use std::sync::Arc;

use tracing::{info, warn};

use chirpy_crypto::{
    CryptoError, generate_opaque_token, issue_identity_token, verify_identity_token,
};
use chirpy_db::{Database, DbError};
use chirpy_types::api::LoginResponse;

/// Login, refresh and revoke on top of the store and the credential engine.
///
/// Owns the signing secret so request handlers never see it.
pub struct SessionManager {
    db: Arc<Database>,
    secret: String,
}

impl SessionManager {
    pub fn new(db: Arc<Database>, secret: impl Into<String>) -> Self {
        Self {
            db,
            secret: secret.into(),
        }
    }

    /// Check credentials, then hand out an identity token and a new refresh
    /// token. Any earlier refresh token for the user stops working.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        ttl_secs: Option<u64>,
    ) -> Result<LoginResponse, DbError> {
        let user = self.db.authenticate_user(email, password).inspect_err(|e| {
            warn!("Login rejected: {}", e);
        })?;

        let token = issue_identity_token(user.id, &self.secret, ttl_secs)?;
        let refresh_token = generate_opaque_token()?;
        self.db.write_refresh_token(user.id, &refresh_token)?;

        info!("User {} logged in", user.id);
        Ok(LoginResponse {
            user: user.into(),
            token,
            refresh_token,
        })
    }

    /// New identity token for a live refresh token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, DbError> {
        self.db.resolve_refresh_token(refresh_token, &self.secret)
    }

    pub fn revoke(&self, refresh_token: &str) -> Result<(), DbError> {
        self.db.revoke_refresh_token(refresh_token)
    }

    /// User ID carried by a valid identity token.
    pub fn authenticate(&self, identity_token: &str) -> Result<u64, CryptoError> {
        verify_identity_token(identity_token, &self.secret)
    }
}
