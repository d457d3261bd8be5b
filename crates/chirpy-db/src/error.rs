use thiserror::Error;

use chirpy_crypto::CryptoError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("chirp {0} not found")]
    ChirpNotFound(u64),

    #[error("user {0} not found")]
    UserNotFound(u64),

    #[error("email is already registered")]
    EmailTaken,

    #[error("no user associated with the provided email")]
    NoSuchEmail,

    #[error("password is incorrect for the given email")]
    WrongPassword,

    #[error("no valid refresh token found")]
    NoValidToken,

    #[error("refresh token has expired")]
    TokenExpired,

    #[error("database I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("no IDs left to allocate")]
    IdSpaceExhausted,

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl DbError {
    /// I/O, decoding or locking trouble: the caller did nothing wrong.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            DbError::Io(_) | DbError::Corrupt(_) | DbError::LockPoisoned | DbError::IdSpaceExhausted
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::ChirpNotFound(_) | DbError::UserNotFound(_))
    }
}
