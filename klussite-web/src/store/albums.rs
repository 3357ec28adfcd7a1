//! Album persistence
//!
//! Albums are returned unordered here; the gallery layer sorts them by
//! created_date after the fetch. The stored photo_count is written as 0
//! and never read back as authoritative.

use klussite_common::db::models::{Album, AlbumCategory};
use klussite_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert a new album. The name is trimmed; the creation date comes from
/// the store.
pub async fn insert(pool: &SqlitePool, name: &str, category: AlbumCategory) -> Result<Album> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Album name must not be empty".to_string()));
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO albums (id, name, category, photo_count) VALUES (?, ?, ?, 0)",
    )
    .bind(&id)
    .bind(name)
    .bind(category.as_str())
    .execute(pool)
    .await?;

    get(pool, &id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Album {} vanished after insert", id)))
}

/// Load one album by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, name, category, created_date, photo_count FROM albums WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(from_row).transpose()
}

/// List all albums (unordered)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query("SELECT id, name, category, created_date, photo_count FROM albums")
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(from_row).collect()
}

/// Delete an album record by id. The photo cascade is handled separately
/// by the caller.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Album not found: {}", id)));
    }
    Ok(())
}

fn from_row(row: sqlx::sqlite::SqliteRow) -> Result<Album> {
    let category_str: String = row.get("category");
    let category = AlbumCategory::parse(&category_str)
        .ok_or_else(|| Error::Internal(format!("Unknown album category: {}", category_str)))?;

    Ok(Album {
        id: row.get("id"),
        name: row.get("name"),
        category,
        created_date: row.get("created_date"),
        photo_count: row.get("photo_count"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use klussite_common::db::create_all_tables;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_all_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_insert_trims_name() {
        let pool = test_pool().await;
        let album = insert(&pool, "  Huis Jansen  ", AlbumCategory::Schilderwerk)
            .await
            .unwrap();
        assert_eq!(album.name, "Huis Jansen");
        assert_eq!(album.photo_count, 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_name() {
        let pool = test_pool().await;
        let err = insert(&pool, "   ", AlbumCategory::Tuinieren).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_album() {
        let pool = test_pool().await;
        let album = insert(&pool, "Tuin 2024", AlbumCategory::Tuinieren).await.unwrap();
        delete(&pool, &album.id).await.unwrap();
        assert!(get(&pool, &album.id).await.unwrap().is_none());
    }
}
