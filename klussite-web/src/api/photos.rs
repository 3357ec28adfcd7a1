//! Photo handlers
//!
//! Uploads run as a background batch: the POST validates and returns
//! 202 Accepted with an upload id, and progress is polled on
//! GET /api/admin/uploads/{id}. Files within a batch are uploaded one at
//! a time and persisted as soon as their CDN URL is known.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use klussite_common::db::models::Photo;

use crate::services::gallery;
use crate::services::image_host::{CloudinaryClient, UploadFile};
use crate::services::upload::{validate_batch, BatchProgress, UploadPipeline, UploadState};
use crate::store::{albums, photos};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/albums/{name}/photos
///
/// Photos in the named album, newest upload first.
pub async fn list_album_photos(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<Photo>>> {
    let all = photos::list_all(&state.db).await?;
    Ok(Json(gallery::photos_in_album(&all, &name)))
}

/// POST /api/admin/albums/{name}/photos response
#[derive(Debug, Serialize)]
pub struct StartUploadResponse {
    pub upload_id: Uuid,
    pub total_files: usize,
}

/// POST /api/admin/albums/{name}/photos
///
/// Accept a multipart batch for the named album. The whole batch is
/// validated up front; any oversized or non-image file rejects
/// everything with 400 before a single byte leaves the server.
pub async fn upload_photos(
    State(state): State<AppState>,
    Path(name): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<StartUploadResponse>)> {
    let album_exists = albums::list_all(&state.db)
        .await?
        .iter()
        .any(|a| a.name == name);
    if !album_exists {
        return Err(ApiError::NotFound(format!("Album not found: {}", name)));
    }

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        // Only file parts carry a filename; anything else is ignored
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read part: {}", e)))?;
        files.push(UploadFile {
            filename,
            content_type,
            bytes,
        });
    }

    if let Err(err) = validate_batch(&files) {
        return Err(ApiError::BadRequest(err.to_string()));
    }

    let upload_id = Uuid::new_v4();
    let (tx, rx) = watch::channel(BatchProgress::pending(files.len()));
    state.uploads.write().await.insert(upload_id, rx);

    let total_files = files.len();
    info!(%upload_id, album = %name, files = total_files, "Upload batch accepted");

    let db = state.db.clone();
    let host = CloudinaryClient::new(state.http.clone(), &state.config.image_host);
    tokio::spawn(async move {
        let pipeline = UploadPipeline::new(&host, &db);
        if let Err(e) = pipeline.run(&name, &files, &tx).await {
            error!(%upload_id, error = %e, "Upload batch failed");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(StartUploadResponse {
            upload_id,
            total_files,
        }),
    ))
}

/// GET /api/admin/uploads/{id}
///
/// Latest progress snapshot for an upload batch. A terminal snapshot
/// (completed or failed) is delivered once; the session entry is dropped
/// afterwards so the map does not grow for the life of the process.
pub async fn upload_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BatchProgress>> {
    let snapshot = {
        let uploads = state.uploads.read().await;
        let rx = uploads
            .get(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Upload not found: {}", id)))?;
        let snapshot = rx.borrow().clone();
        snapshot
    };

    if matches!(
        snapshot.state,
        UploadState::Completed | UploadState::Failed
    ) {
        state.uploads.write().await.remove(&id);
    }

    Ok(Json(snapshot))
}

/// DELETE /api/admin/photos/{id}
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    photos::delete(&state.db, &id).await?;
    info!(photo_id = %id, "Photo deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
