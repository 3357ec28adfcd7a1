//! klussite-web library interface
//!
//! Exposes the application state and router so integration tests can
//! drive the service without binding a socket.

pub mod api;
pub mod error;
pub mod lightbox;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use klussite_common::config::SiteConfig;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use crate::services::upload::BatchProgress;

/// Largest request body accepted on the photo upload route. Individual
/// files are capped at 10 MiB by batch validation; this bounds the batch
/// as a whole.
const UPLOAD_BODY_LIMIT: usize = 256 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service configuration
    pub config: Arc<SiteConfig>,
    /// Shared outbound HTTP client (image CDN, webhook)
    pub http: reqwest::Client,
    /// Active admin session tokens
    pub sessions: Arc<RwLock<HashSet<String>>>,
    /// Progress receivers for running/finished upload batches
    pub uploads: Arc<RwLock<HashMap<Uuid, watch::Receiver<BatchProgress>>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: SiteConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            http: reqwest::Client::new(),
            sessions: Arc::new(RwLock::new(HashSet::new())),
            uploads: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Build application router
///
/// Mutation routes sit behind the admin session middleware; everything a
/// site visitor needs is public.
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::middleware;
    use axum::routing::{delete, get, post, put};

    // Admin routes (require a valid session token)
    let admin = Router::new()
        .route("/api/admin/quotes", get(api::quotes::list_quotes))
        .route("/api/admin/quotes/:id/status", put(api::quotes::update_quote_status))
        .route("/api/admin/quotes/:id", delete(api::quotes::delete_quote))
        .route("/api/admin/albums", post(api::albums::create_album))
        .route("/api/admin/albums/:id", delete(api::albums::delete_album))
        .route(
            "/api/admin/albums/:name/photos",
            post(api::photos::upload_photos).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/admin/uploads/:id", get(api::photos::upload_status))
        .route("/api/admin/photos/:id", delete(api::photos::delete_photo))
        .route("/api/admin/logout", post(api::auth::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_admin,
        ));

    // Public routes
    let public = Router::new()
        .route("/", get(api::ui::serve_index))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .route("/api/albums", get(api::albums::list_albums))
        .route("/api/albums/:name/photos", get(api::photos::list_album_photos))
        .route("/api/reviews", get(api::reviews::list_reviews))
        .route("/api/quotes", post(api::quotes::create_quote))
        .route("/api/admin/login", post(api::auth::login))
        .merge(api::health::health_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
