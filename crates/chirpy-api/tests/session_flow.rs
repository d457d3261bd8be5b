use std::sync::Arc;

use chirpy_api::session::SessionManager;
use chirpy_crypto::verify_identity_token;
use chirpy_db::{Database, DbError};

const SECRET: &str = "flow-secret";

fn setup() -> (tempfile::TempDir, Arc<Database>, SessionManager) {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(Database::open(&dir.path().join("database.json")).unwrap());
    let sessions = SessionManager::new(db.clone(), SECRET);
    (dir, db, sessions)
}

#[test]
fn login_refresh_revoke_lifecycle() {
    let (_dir, db, sessions) = setup();
    let user = db.create_user("a@x.com", "pw1").unwrap();

    let login = sessions.login("a@x.com", "pw1", None).unwrap();
    let t1 = login.refresh_token;

    let refreshed = sessions.refresh(&t1).unwrap();
    assert_eq!(verify_identity_token(&refreshed, SECRET).unwrap(), user.id);

    sessions.revoke(&t1).unwrap();
    assert!(matches!(sessions.refresh(&t1), Err(DbError::NoValidToken)));
}

#[test]
fn upgrade_lifecycle() {
    let (_dir, db, _sessions) = setup();
    let user = db.create_user("a@x.com", "pw1").unwrap();
    assert!(!user.is_chirpy_red);

    db.upgrade_user(user.id).unwrap();
    assert!(db.get_user(user.id).unwrap().is_chirpy_red);

    db.upgrade_user(user.id).unwrap();
    assert!(db.get_user(user.id).unwrap().is_chirpy_red);

    assert!(matches!(db.upgrade_user(user.id + 100), Err(DbError::UserNotFound(_))));
}

#[test]
fn upgrade_is_visible_on_next_login() {
    let (_dir, db, sessions) = setup();
    let user = db.create_user("a@x.com", "pw1").unwrap();
    db.upgrade_user(user.id).unwrap();

    let login = sessions.login("a@x.com", "pw1", Some(60)).unwrap();
    assert!(login.user.is_chirpy_red);
}

#[test]
fn update_user_then_login_with_new_credentials() {
    let (_dir, db, sessions) = setup();
    let user = db.create_user("a@x.com", "pw1").unwrap();
    let login = sessions.login("a@x.com", "pw1", None).unwrap();

    let caller = sessions.authenticate(&login.token).unwrap();
    assert_eq!(caller, user.id);
    db.update_user(caller, "b@x.com", "pw2").unwrap();

    assert!(sessions.login("a@x.com", "pw1", None).is_err());
    let relogin = sessions.login("b@x.com", "pw2", None).unwrap();
    assert_eq!(relogin.user.id, user.id);
}

#[test]
fn expired_refresh_token_cannot_be_used() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(&dir.path().join("database.json"))
        .unwrap()
        .with_refresh_ttl(chrono::Duration::seconds(-60));
    let db = Arc::new(db);
    let sessions = SessionManager::new(db.clone(), SECRET);
    db.create_user("a@x.com", "pw1").unwrap();

    let login = sessions.login("a@x.com", "pw1", None).unwrap();
    assert!(matches!(
        sessions.refresh(&login.refresh_token),
        Err(DbError::TokenExpired)
    ));
    assert!(matches!(
        sessions.revoke(&login.refresh_token),
        Err(DbError::TokenExpired)
    ));
}
