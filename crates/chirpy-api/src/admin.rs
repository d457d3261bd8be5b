use std::sync::atomic::Ordering;

use axum::{extract::State, http::StatusCode, response::Html};
use tracing::info;

use crate::AppState;

/// GET /api/healthz
pub async fn readiness() -> &'static str {
    "OK"
}

/// GET /admin/metrics: fileserver hit count as a small HTML page.
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.fileserver_hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>\n\
         <body>\n\
         <h1>Welcome, Chirpy Admin</h1>\n\
         <p>Chirpy has been visited {hits} times!</p>\n\
         </body>\n\
         </html>\n"
    ))
}

/// GET /api/reset: zero the hit counter.
pub async fn reset_metrics(State(state): State<AppState>) -> StatusCode {
    state.fileserver_hits.store(0, Ordering::Relaxed);
    info!("Fileserver hit counter reset");
    StatusCode::OK
}
