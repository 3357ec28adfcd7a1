//! Quote request handlers
//!
//! The public form creates quote requests; listing, status changes, and
//! deletion are admin-only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use klussite_common::db::models::{QuoteRequest, QuoteStatus};

use crate::services::notify;
use crate::store::quotes::{self, NewQuote};
use crate::{ApiError, ApiResult, AppState};

/// POST /api/quotes request body
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub description: String,
}

/// POST /api/quotes
///
/// Submit a quote request from the public form. Status starts as
/// pending, the submitted date is server-assigned.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> ApiResult<(StatusCode, Json<QuoteRequest>)> {
    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
        ("service", &request.service),
        ("description", &request.description),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Field '{}' must not be empty",
                field
            )));
        }
    }

    let new = NewQuote {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
        service: request.service.trim().to_string(),
        description: request.description.trim().to_string(),
    };
    let quote = quotes::insert(&state.db, &new).await?;
    info!(quote_id = %quote.id, service = %quote.service, "Quote request received");

    if let Some(webhook) = &state.config.notify_webhook {
        notify::spawn_quote_notification(state.http.clone(), webhook.clone(), &quote);
    }

    Ok((StatusCode::CREATED, Json(quote)))
}

/// GET /api/admin/quotes
///
/// All quote requests, newest first.
pub async fn list_quotes(State(state): State<AppState>) -> ApiResult<Json<Vec<QuoteRequest>>> {
    let all = quotes::list_all(&state.db).await?;
    Ok(Json(all))
}

/// PUT /api/admin/quotes/{id}/status request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: QuoteStatus,
}

/// PUT /api/admin/quotes/{id}/status
pub async fn update_quote_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<QuoteRequest>> {
    quotes::update_status(&state.db, &id, request.status).await?;
    let quote = quotes::get(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Quote not found: {}", id)))?;
    Ok(Json(quote))
}

/// DELETE /api/admin/quotes/{id}
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    quotes::delete(&state.db, &id).await?;
    info!(quote_id = %id, "Quote request deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
