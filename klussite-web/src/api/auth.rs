//! Admin session handling
//!
//! Login verifies the password against the configured SHA-256 hash and
//! issues an opaque bearer token. The middleware checks that token on
//! every admin route. Tokens live in memory only; a restart signs
//! everyone out.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiError, ApiResult, AppState};

/// POST /api/admin/login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/admin/login
///
/// Exchange the admin password for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if !state.config.verify_admin_password(&request.password) {
        warn!("Admin login rejected: wrong password");
        return Err(ApiError::PermissionDenied("Invalid password".to_string()));
    }

    let token = Uuid::new_v4().to_string();
    state.sessions.write().await.insert(token.clone());
    info!("Admin login accepted");

    Ok(Json(LoginResponse { token }))
}

/// POST /api/admin/logout
///
/// Invalidate the presented session token.
pub async fn logout(State(state): State<AppState>, request: Request) -> ApiResult<Json<serde_json::Value>> {
    if let Some(token) = bearer_token(&request) {
        state.sessions.write().await.remove(&token);
    }
    Ok(Json(serde_json::json!({ "status": "logged_out" })))
}

/// Admin authentication middleware
///
/// Requires `Authorization: Bearer <token>` with a token issued by
/// login. Returns 401 otherwise.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::PermissionDenied("Missing bearer token".to_string()))?;

    if !state.sessions.read().await.contains(&token) {
        return Err(ApiError::PermissionDenied(
            "Invalid or expired session".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
