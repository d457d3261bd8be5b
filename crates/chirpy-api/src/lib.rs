pub mod admin;
pub mod auth;
pub mod chirps;
pub mod error;
pub mod middleware;
pub mod session;
pub mod users;
pub mod validate;
pub mod webhooks;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use chirpy_db::Database;

use crate::session::SessionManager;

pub type AppState = Arc<AppStateInner>;

/// Process-wide state handed to every handler. Built once at startup.
pub struct AppStateInner {
    pub db: Arc<Database>,
    pub sessions: SessionManager,
    pub polka_key: String,
    pub fileserver_hits: AtomicU64,
}

impl AppStateInner {
    pub fn new(
        db: Database,
        jwt_secret: impl Into<String>,
        polka_key: impl Into<String>,
    ) -> AppState {
        let db = Arc::new(db);
        Arc::new(Self {
            sessions: SessionManager::new(db.clone(), jwt_secret),
            db,
            polka_key: polka_key.into(),
            fileserver_hits: AtomicU64::new(0),
        })
    }
}

/// Full HTTP surface. Static files under `/app` are served from `fileroot`.
pub fn router(state: AppState, fileroot: impl AsRef<Path>) -> Router {
    let static_files = Router::new()
        .nest_service("/app", ServeDir::new(fileroot.as_ref()))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::count_hits,
        ));

    let api = Router::new()
        .route("/api/healthz", get(admin::readiness))
        .route("/api/reset", get(admin::reset_metrics))
        .route("/admin/metrics", get(admin::metrics))
        .route("/api/users", post(users::create_user).put(users::update_user))
        .route("/api/login", post(auth::login))
        .route("/api/refresh", post(auth::refresh))
        .route("/api/revoke", post(auth::revoke))
        .route("/api/chirps", post(chirps::create_chirp).get(chirps::list_chirps))
        .route(
            "/api/chirps/{chirp_id}",
            get(chirps::get_chirp).delete(chirps::delete_chirp),
        )
        .route("/api/polka/webhooks", post(webhooks::polka_webhook))
        .with_state(state);

    Router::new()
        .merge(static_files)
        .merge(api)
        .layer(TraceLayer::new_for_http())
}
