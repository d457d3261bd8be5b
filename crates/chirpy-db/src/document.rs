use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::DbError;
use crate::models::{ChirpRecord, RefreshTokenRecord, UserRecord};

/// The whole database: three integer-keyed maps plus the ID counters.
///
/// `BTreeMap` keeps keys ordered, so iteration is ascending by ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub chirps: BTreeMap<u64, ChirpRecord>,
    #[serde(default)]
    pub users: BTreeMap<u64, UserRecord>,
    /// Keyed by user ID: one live token per user.
    #[serde(default)]
    pub refresh_tokens: BTreeMap<u64, RefreshTokenRecord>,
    #[serde(default)]
    pub next_chirp_id: u64,
    #[serde(default)]
    pub next_user_id: u64,
}

impl Document {
    /// Parse a document. An empty file is an empty database.
    ///
    /// Chirp entries whose stored ID does not match their key are deletion
    /// tombstones left by older writers and are dropped.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::fresh());
        }
        let mut doc: Document = serde_json::from_str(raw)?;
        // Counters first, so a tombstoned ID is never handed out again.
        doc.normalize_counters();
        doc.chirps.retain(|key, chirp| chirp.id != 0 && chirp.id == *key);
        Ok(doc)
    }

    pub fn fresh() -> Self {
        let mut doc = Self::default();
        doc.normalize_counters();
        doc
    }

    /// Counters missing from older documents resume past the highest ID seen.
    /// A counter that lags behind existing keys is pulled forward too.
    pub fn normalize_counters(&mut self) {
        let chirp_floor = next_after(self.chirps.keys().next_back());
        self.next_chirp_id = self.next_chirp_id.max(chirp_floor);

        let user_floor = next_after(self.users.keys().next_back());
        self.next_user_id = self.next_user_id.max(user_floor);
    }

    pub fn allocate_chirp_id(&mut self) -> Result<u64, DbError> {
        allocate(&mut self.next_chirp_id)
    }

    pub fn allocate_user_id(&mut self) -> Result<u64, DbError> {
        allocate(&mut self.next_user_id)
    }

    pub fn email_in_use(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    /// Find the owner of a refresh token regardless of expiry.
    pub fn refresh_token_owner(&self, token: &str) -> Option<(u64, &RefreshTokenRecord)> {
        if token.is_empty() {
            return None;
        }
        self.refresh_tokens
            .iter()
            .find(|(_, record)| record.refresh_token == token)
            .map(|(user_id, record)| (*user_id, record))
    }
}

/// `u64::MAX` is never handed out; a counter saturated there is exhausted.
fn next_after(last: Option<&u64>) -> u64 {
    last.copied().unwrap_or(0).saturating_add(1)
}

fn allocate(counter: &mut u64) -> Result<u64, DbError> {
    let id = (*counter).max(1);
    if id == u64::MAX {
        return Err(DbError::IdSpaceExhausted);
    }
    *counter = id + 1;
    Ok(id)
}
