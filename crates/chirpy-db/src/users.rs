use chirpy_crypto::{CryptoError, hash_password, verify_password};
use tracing::{debug, info};

use crate::models::UserRecord;
use crate::{Database, DbError};

impl Database {
    /// Register a new user. Emails are unique and compared case-sensitively.
    pub fn create_user(&self, email: &str, password: &str) -> Result<UserRecord, DbError> {
        // Hash outside the lock.
        let hashed_password = hash_password(password)?;

        self.with_doc_mut(|doc| {
            if doc.email_in_use(email, None) {
                return Err(DbError::EmailTaken);
            }

            let id = doc.allocate_user_id()?;
            let user = UserRecord {
                id,
                email: email.to_string(),
                hashed_password,
                is_chirpy_red: false,
            };
            doc.users.insert(id, user.clone());

            info!("User {} registered", id);
            Ok(user)
        })
    }

    pub fn get_user(&self, id: u64) -> Result<UserRecord, DbError> {
        self.with_doc(|doc| doc.users.get(&id).cloned().ok_or(DbError::UserNotFound(id)))
    }

    /// Look up a user by email and check the password.
    pub fn authenticate_user(&self, email: &str, password: &str) -> Result<UserRecord, DbError> {
        let user = self.with_doc(|doc| {
            doc.users
                .values()
                .find(|u| u.email == email)
                .cloned()
                .ok_or(DbError::NoSuchEmail)
        })?;

        verify_password(&user.hashed_password, password).map_err(|e| match e {
            CryptoError::CredentialMismatch => DbError::WrongPassword,
            other => other.into(),
        })?;

        Ok(user)
    }

    /// Replace email and password. The upgraded flag is carried over.
    pub fn update_user(
        &self,
        id: u64,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, DbError> {
        let hashed_password = hash_password(password)?;

        self.with_doc_mut(|doc| {
            if !doc.users.contains_key(&id) {
                return Err(DbError::UserNotFound(id));
            }
            if doc.email_in_use(email, Some(id)) {
                return Err(DbError::EmailTaken);
            }

            let user = doc.users.get_mut(&id).ok_or(DbError::UserNotFound(id))?;
            user.email = email.to_string();
            user.hashed_password = hashed_password;

            debug!("User {} updated", id);
            Ok(user.clone())
        })
    }

    /// Mark a user as upgraded. Calling it again is a successful no-op.
    pub fn upgrade_user(&self, id: u64) -> Result<(), DbError> {
        self.with_doc_mut(|doc| {
            let user = doc.users.get_mut(&id).ok_or(DbError::UserNotFound(id))?;
            if !user.is_chirpy_red {
                user.is_chirpy_red = true;
                info!("User {} upgraded", id);
            }
            Ok(())
        })
    }
}
