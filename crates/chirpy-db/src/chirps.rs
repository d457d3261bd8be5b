use tracing::debug;

use crate::models::ChirpRecord;
use crate::{Database, DbError};

impl Database {
    /// Store a chirp. The body must already be validated and masked.
    pub fn create_chirp(&self, author_id: u64, body: &str) -> Result<ChirpRecord, DbError> {
        self.with_doc_mut(|doc| {
            if !doc.users.contains_key(&author_id) {
                return Err(DbError::UserNotFound(author_id));
            }

            let id = doc.allocate_chirp_id()?;
            let chirp = ChirpRecord {
                id,
                body: body.to_string(),
                author_id,
            };
            doc.chirps.insert(id, chirp.clone());

            debug!("Chirp {} created by user {}", id, author_id);
            Ok(chirp)
        })
    }

    /// All chirps, ascending by ID.
    pub fn list_chirps(&self) -> Result<Vec<ChirpRecord>, DbError> {
        self.with_doc(|doc| Ok(doc.chirps.values().cloned().collect()))
    }

    pub fn get_chirp(&self, id: u64) -> Result<ChirpRecord, DbError> {
        self.with_doc(|doc| doc.chirps.get(&id).cloned().ok_or(DbError::ChirpNotFound(id)))
    }

    /// Remove a chirp. Its ID is never handed out again.
    pub fn delete_chirp(&self, id: u64) -> Result<(), DbError> {
        self.with_doc_mut(|doc| {
            doc.chirps.remove(&id).ok_or(DbError::ChirpNotFound(id))?;
            debug!("Chirp {} deleted", id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::testutil::temp_db;

    #[test]
    fn ids_start_at_one_and_increase() {
        let (_dir, db) = temp_db();
        let user = db.create_user("a@x.com", "pw").unwrap();

        let first = db.create_chirp(user.id, "first").unwrap();
        let second = db.create_chirp(user.id, "second").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.author_id, user.id);
    }

    #[test]
    fn unknown_author_is_rejected() {
        let (_dir, db) = temp_db();
        let err = db.create_chirp(99, "orphan").unwrap_err();
        assert!(matches!(err, DbError::UserNotFound(99)));
        assert!(db.list_chirps().unwrap().is_empty());
    }

    #[test]
    fn list_is_ascending_and_idempotent() {
        let (_dir, db) = temp_db();
        let user = db.create_user("a@x.com", "pw").unwrap();
        for body in ["a", "b", "c", "d", "e"] {
            db.create_chirp(user.id, body).unwrap();
        }
        db.delete_chirp(2).unwrap();
        db.delete_chirp(4).unwrap();
        db.create_chirp(user.id, "f").unwrap();

        let first = db.list_chirps().unwrap();
        let second = db.list_chirps().unwrap();
        assert_eq!(first, second);

        let ids: Vec<u64> = first.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3, 5, 6]);
    }

    #[test]
    fn deleted_chirp_stays_gone() {
        let (_dir, db) = temp_db();
        let user = db.create_user("a@x.com", "pw").unwrap();
        let chirp = db.create_chirp(user.id, "bye").unwrap();

        db.delete_chirp(chirp.id).unwrap();
        assert!(matches!(db.get_chirp(chirp.id), Err(DbError::ChirpNotFound(_))));
        assert!(matches!(db.delete_chirp(chirp.id), Err(DbError::ChirpNotFound(_))));

        // A later chirp never reuses the deleted ID.
        let next = db.create_chirp(user.id, "hello again").unwrap();
        assert_ne!(next.id, chirp.id);
        assert!(matches!(db.get_chirp(chirp.id), Err(DbError::ChirpNotFound(_))));
    }

    #[test]
    fn ids_not_reused_after_deleting_the_newest() {
        let (_dir, db) = temp_db();
        let user = db.create_user("a@x.com", "pw").unwrap();
        db.create_chirp(user.id, "one").unwrap();
        let two = db.create_chirp(user.id, "two").unwrap();

        db.delete_chirp(two.id).unwrap();
        let three = db.create_chirp(user.id, "three").unwrap();
        assert_eq!(three.id, 3);
    }

    #[test]
    fn legacy_tombstone_stays_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(
            &path,
            r#"{
                "chirps": {
                    "1": {"id": 1, "body": "first", "author_id": 1},
                    "2": {"id": 0, "body": "", "author_id": 0}
                },
                "users": {
                    "1": {"id": 1, "email": "a@x.com", "hashed_password": "h"}
                }
            }"#,
        )
        .unwrap();
        let db = Database::open(&path).unwrap();

        let ids: Vec<u64> = db.list_chirps().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
        assert!(matches!(db.get_chirp(2), Err(DbError::ChirpNotFound(2))));
        assert!(matches!(db.delete_chirp(2), Err(DbError::ChirpNotFound(2))));
        assert_eq!(db.create_chirp(1, "next").unwrap().id, 3);
    }

    #[test]
    fn concurrent_creates_get_unique_ids() {
        let (_dir, db) = temp_db();
        let user = db.create_user("a@x.com", "pw").unwrap();
        let db = Arc::new(db);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let db = db.clone();
                thread::spawn(move || {
                    (0..10)
                        .map(|i| db.create_chirp(user.id, &format!("{t}-{i}")).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 80);
        assert_eq!(db.list_chirps().unwrap().len(), 80);
        assert_eq!(ids, (1..=80).collect::<HashSet<u64>>());
    }
}
