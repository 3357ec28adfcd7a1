//! Album handlers
//!
//! Album photo counts are never read from the stored column; they are
//! derived by matching photo album names in memory, so the listing is
//! correct even when the denormalized counter drifts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use klussite_common::db::models::{Album, AlbumCategory};

use crate::services::{cascade, gallery};
use crate::store::{albums, photos};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/albums
///
/// Albums with derived photo counts, newest first.
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<Json<Vec<gallery::AlbumView>>> {
    let all_albums = albums::list_all(&state.db).await?;
    let all_photos = photos::list_all(&state.db).await?;
    Ok(Json(gallery::album_views(&all_albums, &all_photos)))
}

/// POST /api/admin/albums request body
#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub name: String,
    pub category: AlbumCategory,
}

/// POST /api/admin/albums
pub async fn create_album(
    State(state): State<AppState>,
    Json(request): Json<CreateAlbumRequest>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    let album = albums::insert(&state.db, &request.name, request.category).await?;
    info!(album_id = %album.id, name = %album.name, "Album created");
    Ok((StatusCode::CREATED, Json(album)))
}

/// DELETE /api/admin/albums/{id} response
#[derive(Debug, Serialize)]
pub struct DeleteAlbumResponse {
    pub status: String,
    pub photos_deleted: usize,
    pub photos_failed: usize,
}

/// DELETE /api/admin/albums/{id}
///
/// Deletes the album and every photo carrying its name. Photo delete
/// failures are reported but never block the album removal.
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAlbumResponse>> {
    let album = albums::get(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Album not found: {}", id)))?;

    let outcome = cascade::delete_album_with_photos(&state.db, &album).await?;
    info!(
        album_id = %id,
        photos_deleted = outcome.photos_deleted,
        photos_failed = outcome.photos_failed,
        "Album deleted"
    );

    Ok(Json(DeleteAlbumResponse {
        status: "deleted".to_string(),
        photos_deleted: outcome.photos_deleted,
        photos_failed: outcome.photos_failed,
    }))
}
