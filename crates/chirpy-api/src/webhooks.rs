use axum::{Json, extract::State, http::StatusCode};
use tracing::debug;

use chirpy_types::api::{USER_UPGRADED_EVENT, WebhookRequest};

use crate::AppState;
use crate::error::{ApiError, blocking};
use crate::middleware::PolkaCaller;

/// POST /api/polka/webhooks: payment provider callback.
///
/// Authenticated by `Authorization: ApiKey <POLKA_KEY>`. Only
/// `user.upgraded` has an effect; other events are acknowledged and ignored.
pub async fn polka_webhook(
    State(state): State<AppState>,
    _caller: PolkaCaller,
    Json(req): Json<WebhookRequest>,
) -> Result<StatusCode, ApiError> {
    if req.event != USER_UPGRADED_EVENT {
        debug!("Ignoring webhook event {}", req.event);
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = req.data.user_id;
    blocking(move || state.db.upgrade_user(user_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
