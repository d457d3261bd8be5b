pub mod chirps;
pub mod document;
mod error;
pub mod models;
pub mod refresh_tokens;
pub mod users;

pub use error::DbError;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::Document;

/// Refresh tokens stay valid for 60 days unless configured otherwise.
pub const DEFAULT_REFRESH_TTL_HOURS: i64 = 1440;

/// Single-file JSON store for chirps, users and refresh tokens.
///
/// Every operation reloads the whole document from disk. Reads share the lock;
/// writes hold it exclusively across load, mutate and persist, so concurrent
/// writers serialize and never lose each other's updates. One process must own
/// the file.
pub struct Database {
    path: PathBuf,
    lock: RwLock<()>,
    refresh_ttl: Duration,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let db = Self {
            path: path.to_path_buf(),
            lock: RwLock::new(()),
            refresh_ttl: Duration::hours(DEFAULT_REFRESH_TTL_HOURS),
        };

        // Fail early on a corrupt file rather than on the first request.
        match fs::read_to_string(path) {
            Ok(raw) => {
                Document::from_json(&raw)?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                db.persist(&Document::fresh())?;
            }
            Err(e) => return Err(e.into()),
        }

        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Override how long newly written refresh tokens stay valid.
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a read-only operation against a freshly loaded document.
    pub fn with_doc<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Document) -> Result<T, DbError>,
    {
        let _guard = self.lock.read().map_err(|_| DbError::LockPoisoned)?;
        let doc = self.load()?;
        f(&doc)
    }

    /// Load, mutate and persist under the exclusive lock.
    /// Nothing is written when `f` returns an error.
    pub fn with_doc_mut<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Document) -> Result<T, DbError>,
    {
        let _guard = self.lock.write().map_err(|_| DbError::LockPoisoned)?;
        let mut doc = self.load()?;
        let result = f(&mut doc)?;
        self.persist(&doc)?;
        Ok(result)
    }

    /// Replace the backing document with an empty one. Counters restart at 1.
    pub fn wipe_all(&self) -> Result<(), DbError> {
        let _guard = self.lock.write().map_err(|_| DbError::LockPoisoned)?;
        self.persist(&Document::fresh())?;
        info!("Database wiped at {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Document, DbError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::fresh()),
            Err(e) => return Err(e.into()),
        };
        Ok(Document::from_json(&raw)?)
    }

    /// Write to a sibling temp file then rename over the original, so readers
    /// never observe a half-written document.
    fn persist(&self, doc: &Document) -> Result<(), DbError> {
        let payload = serde_json::to_vec(doc)?;
        let temp_path = self
            .path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        let written =
            fs::write(&temp_path, payload).and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            warn!("Failed to persist {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(
            "Persisted {} chirps, {} users, {} refresh tokens",
            doc.chirps.len(),
            doc.users.len(),
            doc.refresh_tokens.len()
        );
        Ok(())
    }
}
