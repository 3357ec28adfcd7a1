//! Album cascade deletion
//!
//! Deleting an album deletes every photo whose album_name matches, then
//! the album record itself. The photo deletions are issued concurrently
//! and awaited collectively; the album deletion is sequenced after their
//! settlement. There is no transaction around the two phases.
//!
//! Best-effort semantics: the album is deleted even if some photo
//! deletions fail. Failures are logged and counted in the outcome so the
//! caller can surface them.

use futures::future::join_all;
use klussite_common::db::models::Album;
use klussite_common::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::store;

/// What the cascade accomplished
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct CascadeOutcome {
    pub photos_deleted: usize,
    pub photos_failed: usize,
}

/// Delete the album and all photos matching its name
pub async fn delete_album_with_photos(pool: &SqlitePool, album: &Album) -> Result<CascadeOutcome> {
    let all_photos = store::photos::list_all(pool).await?;
    let matching: Vec<_> = all_photos
        .into_iter()
        .filter(|p| p.album_name == album.name)
        .collect();

    info!(album = %album.name, photos = matching.len(), "Deleting album with photos");

    // Fire all photo deletions concurrently, await their settlement
    let results = join_all(
        matching
            .iter()
            .map(|photo| store::photos::delete(pool, &photo.id)),
    )
    .await;

    let mut photos_deleted = 0;
    let mut photos_failed = 0;
    for (photo, result) in matching.iter().zip(results) {
        match result {
            Ok(()) => photos_deleted += 1,
            Err(e) => {
                warn!(photo_id = %photo.id, error = %e, "Photo deletion failed during cascade");
                photos_failed += 1;
            }
        }
    }

    // Proceed regardless of photo failures
    store::albums::delete(pool, &album.id).await?;

    Ok(CascadeOutcome {
        photos_deleted,
        photos_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use klussite_common::db::create_all_tables;
    use klussite_common::db::models::AlbumCategory;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_all_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_cascade_removes_album_and_all_matching_photos() {
        let pool = test_pool().await;
        let album = store::albums::insert(&pool, "X", AlbumCategory::Schilderwerk)
            .await
            .unwrap();
        for i in 1..=3 {
            store::photos::insert(&pool, &format!("https://cdn/p{}.jpg", i), "X", None)
                .await
                .unwrap();
        }
        // Photo in another album survives
        store::photos::insert(&pool, "https://cdn/other.jpg", "Y", None)
            .await
            .unwrap();

        let outcome = delete_album_with_photos(&pool, &album).await.unwrap();
        assert_eq!(outcome.photos_deleted, 3);
        assert_eq!(outcome.photos_failed, 0);

        let remaining = store::photos::list_all(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].album_name, "Y");
        assert!(store::albums::get(&pool, &album.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cascade_matches_album_name_exactly() {
        let pool = test_pool().await;
        let album = store::albums::insert(&pool, "Tuin", AlbumCategory::Tuinieren)
            .await
            .unwrap();
        store::photos::insert(&pool, "https://cdn/a.jpg", "Tuin", None).await.unwrap();
        store::photos::insert(&pool, "https://cdn/b.jpg", "tuin", None).await.unwrap();

        let outcome = delete_album_with_photos(&pool, &album).await.unwrap();
        assert_eq!(outcome.photos_deleted, 1);

        let remaining = store::photos::list_all(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].album_name, "tuin");
    }

    #[tokio::test]
    async fn test_cascade_on_empty_album_deletes_only_album() {
        let pool = test_pool().await;
        let album = store::albums::insert(&pool, "Leeg", AlbumCategory::AllerleiKlusjes)
            .await
            .unwrap();

        let outcome = delete_album_with_photos(&pool, &album).await.unwrap();
        assert_eq!(outcome.photos_deleted, 0);
        assert!(store::albums::get(&pool, &album.id).await.unwrap().is_none());
    }
}
