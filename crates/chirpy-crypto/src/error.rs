use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    /// Wrong password or an unparseable stored hash.
    #[error("credential mismatch")]
    CredentialMismatch,

    #[error("token signing failed: {0}")]
    SigningFailure(#[source] jsonwebtoken::errors::Error),

    #[error("invalid issuer: {0}")]
    InvalidIssuer(String),

    #[error("malformed subject: {0}")]
    MalformedSubject(String),

    /// Bad signature, expired, or undecodable token.
    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),

    #[error("entropy source unavailable: {0}")]
    EntropyFailure(String),
}

impl CryptoError {
    /// True when the token verified but its `exp` has passed.
    pub fn is_expired(&self) -> bool {
        matches!(
            self,
            CryptoError::Rejected(e)
                if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature)
        )
    }

    /// Failures of the underlying primitive rather than of the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CryptoError::HashingFailure(_)
                | CryptoError::SigningFailure(_)
                | CryptoError::EntropyFailure(_)
        )
    }
}
