//! Review handlers
//!
//! Reviews are read-only through the API; rows are seeded or imported
//! directly into the database.

use axum::{extract::State, Json};

use klussite_common::db::models::Review;

use crate::store::reviews;
use crate::{ApiResult, AppState};

/// GET /api/reviews
///
/// All reviews, newest first.
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Json<Vec<Review>>> {
    let all = reviews::list_all(&state.db).await?;
    Ok(Json(all))
}
