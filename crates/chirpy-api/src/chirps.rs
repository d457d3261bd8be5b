use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::warn;

use chirpy_types::api::{CreateChirpRequest, ListChirpsQuery, SortOrder};
use chirpy_types::models::Chirp;

use crate::AppState;
use crate::error::{ApiError, blocking};
use crate::middleware::AuthUser;
use crate::validate::validate_chirp;

/// POST /api/chirps
pub async fn create_chirp(
    State(state): State<AppState>,
    AuthUser(author_id): AuthUser,
    Json(req): Json<CreateChirpRequest>,
) -> Result<(StatusCode, Json<Chirp>), ApiError> {
    let body = validate_chirp(&req.body)?;
    let chirp = blocking(move || state.db.create_chirp(author_id, &body)).await?;

    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// GET /api/chirps?author_id=N&sort=asc|desc
pub async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<Json<Vec<Chirp>>, ApiError> {
    let rows = blocking(move || state.db.list_chirps()).await?;
    let chirps = select_chirps(rows.into_iter().map(Chirp::from).collect(), &query)?;

    Ok(Json(chirps))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<u64>,
) -> Result<Json<Chirp>, ApiError> {
    let chirp = blocking(move || state.db.get_chirp(chirp_id)).await?;
    Ok(Json(chirp.into()))
}

/// DELETE /api/chirps/{chirp_id}: authors may only delete their own chirps.
pub async fn delete_chirp(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(chirp_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    blocking(move || {
        let chirp = state.db.get_chirp(chirp_id)?;
        if chirp.author_id != user_id {
            warn!("User {} tried to delete chirp {} by {}", user_id, chirp_id, chirp.author_id);
            return Err(ApiError::Forbidden("you can only delete your own chirps".into()));
        }
        state.db.delete_chirp(chirp_id)?;
        Ok(())
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Apply the author filter and sort order to an ascending list.
///
/// A filter that matches nothing is reported as not found.
pub fn select_chirps(
    chirps: Vec<Chirp>,
    query: &ListChirpsQuery,
) -> Result<Vec<Chirp>, ApiError> {
    let mut selected: Vec<Chirp> = match query.author_id {
        Some(author_id) => {
            let matching: Vec<Chirp> = chirps
                .into_iter()
                .filter(|c| c.author_id == author_id)
                .collect();
            if matching.is_empty() {
                return Err(ApiError::NotFound(format!(
                    "no chirps found for author {author_id}"
                )));
            }
            matching
        }
        None => chirps,
    };

    if query.sort == SortOrder::Desc {
        selected.reverse();
    }
    Ok(selected)
}
