//! Persisted record types. These map directly onto the JSON document; the
//! `chirpy-types` views are what leaves the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chirpy_types::models::{Chirp, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChirpRecord {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    /// Argon2id PHC string.
    pub hashed_password: String,
    #[serde(default)]
    pub is_chirpy_red: bool,
}

/// The single live refresh token of one user. Keyed by user ID in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub refresh_token: String,
    pub refresh_expiration: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.refresh_expiration > now
    }
}

impl From<ChirpRecord> for Chirp {
    fn from(row: ChirpRecord) -> Self {
        Chirp {
            id: row.id,
            body: row.body,
            author_id: row.author_id,
        }
    }
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            email: row.email,
            is_chirpy_red: row.is_chirpy_red,
        }
    }
}
