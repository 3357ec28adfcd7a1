//! Photo persistence
//!
//! Photos link to albums by the denormalized album_name string only.
//! Reads always return the full collection; filtering happens in memory.

use klussite_common::db::models::Photo;
use klussite_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert a photo record. The upload date comes from the store.
pub async fn insert(
    pool: &SqlitePool,
    image_url: &str,
    album_name: &str,
    cdn_public_id: Option<&str>,
) -> Result<Photo> {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO photos (id, image_url, album_name, cdn_public_id) VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(image_url)
    .bind(album_name)
    .bind(cdn_public_id)
    .execute(pool)
    .await?;

    get(pool, &id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Photo {} vanished after insert", id)))
}

/// Load one photo by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Photo>> {
    let row = sqlx::query(
        "SELECT id, image_url, album_name, upload_date, cdn_public_id FROM photos WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(from_row))
}

/// List the full photos collection, in insertion order
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Photo>> {
    let rows = sqlx::query(
        "SELECT id, image_url, album_name, upload_date, cdn_public_id FROM photos",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(from_row).collect())
}

/// Delete a photo by id
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM photos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Photo not found: {}", id)));
    }
    Ok(())
}

fn from_row(row: sqlx::sqlite::SqliteRow) -> Photo {
    Photo {
        id: row.get("id"),
        image_url: row.get("image_url"),
        album_name: row.get("album_name"),
        upload_date: row.get("upload_date"),
        cdn_public_id: row.get("cdn_public_id"),
    }
}
