use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::CryptoError;

/// Issuer stamped into, and required of, every identity token.
pub const ISSUER: &str = "Chirpy";

/// Ceiling on identity-token lifetime. Also the default when none is requested.
pub const MAX_TTL_SECS: u64 = 3600;

/// Registered claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// User ID as a decimal string.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Requested lifetimes of zero or above the ceiling fall back to the ceiling.
pub fn clamp_ttl(requested: Option<u64>) -> u64 {
    match requested {
        Some(secs) if secs > 0 && secs <= MAX_TTL_SECS => secs,
        _ => MAX_TTL_SECS,
    }
}

/// Sign an HS256 identity token for `user_id`.
pub fn issue_identity_token(
    user_id: u64,
    secret: &str,
    ttl_secs: Option<u64>,
) -> Result<String, CryptoError> {
    let now = Utc::now();
    let ttl = Duration::seconds(clamp_ttl(ttl_secs) as i64);

    let claims = Claims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(CryptoError::SigningFailure)
}

/// Verify signature, expiry and issuer, then return the user ID from `sub`.
pub fn verify_identity_token(token: &str, secret: &str) -> Result<u64, CryptoError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(CryptoError::Rejected)?;

    let claims = data.claims;
    if claims.iss != ISSUER {
        return Err(CryptoError::InvalidIssuer(claims.iss));
    }

    claims
        .sub
        .parse::<u64>()
        .map_err(|_| CryptoError::MalformedSubject(claims.sub))
}
