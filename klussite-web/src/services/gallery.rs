//! Album aggregation
//!
//! Pure derivations over the already-fetched flat collections. Counts
//! and groupings are recomputed from scratch on every call; nothing here
//! is cached or incrementally maintained. Association is exact,
//! case-sensitive string equality on album_name - no trimming, no
//! normalization.

use chrono::{DateTime, Utc};
use klussite_common::db::models::{Album, AlbumCategory, Photo};
use serde::Serialize;

/// Album with its derived photo count, as served to clients
#[derive(Debug, Clone, Serialize)]
pub struct AlbumView {
    pub id: String,
    pub name: String,
    pub category: AlbumCategory,
    pub created_date: DateTime<Utc>,
    /// Recomputed from the photos collection, never read from storage
    pub photo_count: usize,
}

/// Derive per-album views: exact-match photo counts, sorted by creation
/// date descending (newest first)
pub fn album_views(albums: &[Album], photos: &[Photo]) -> Vec<AlbumView> {
    let mut views: Vec<AlbumView> = albums
        .iter()
        .map(|album| AlbumView {
            id: album.id.clone(),
            name: album.name.clone(),
            category: album.category,
            created_date: album.created_date,
            photo_count: photos.iter().filter(|p| p.album_name == album.name).count(),
        })
        .collect();

    views.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    views
}

/// Photos belonging to the named album, newest upload first
pub fn photos_in_album(photos: &[Photo], album_name: &str) -> Vec<Photo> {
    let mut matching: Vec<Photo> = photos
        .iter()
        .filter(|p| p.album_name == album_name)
        .cloned()
        .collect();

    matching.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
    }

    fn album(id: &str, name: &str, day: u32) -> Album {
        Album {
            id: id.to_string(),
            name: name.to_string(),
            category: AlbumCategory::Tuinieren,
            created_date: date(day),
            // Deliberately wrong: storage is never trusted for counts
            photo_count: 99,
        }
    }

    fn photo(id: &str, album_name: &str, day: u32) -> Photo {
        Photo {
            id: id.to_string(),
            image_url: format!("https://cdn/{}.jpg", id),
            album_name: album_name.to_string(),
            upload_date: date(day),
            cdn_public_id: None,
        }
    }

    #[test]
    fn test_counts_use_exact_case_sensitive_match() {
        let albums = vec![album("a1", "Tuin 2024", 1)];
        let photos = vec![
            photo("p1", "Tuin 2024", 2),
            photo("p2", "tuin 2024", 3),
            photo("p3", "Tuin 2024 ", 4),
        ];

        let views = album_views(&albums, &photos);
        assert_eq!(views.len(), 1);
        // Only the exact match counts; lowercase and trailing-space
        // variants do not
        assert_eq!(views[0].photo_count, 1);
    }

    #[test]
    fn test_stored_photo_count_is_ignored() {
        let albums = vec![album("a1", "Leeg", 1)];
        let views = album_views(&albums, &[]);
        assert_eq!(views[0].photo_count, 0);
    }

    #[test]
    fn test_albums_sorted_by_created_date_desc() {
        let albums = vec![
            album("old", "Oud", 1),
            album("new", "Nieuw", 20),
            album("mid", "Midden", 10),
        ];

        let views = album_views(&albums, &[]);
        assert_eq!(
            views.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            vec!["new", "mid", "old"]
        );
    }

    #[test]
    fn test_photos_filtered_and_sorted_newest_first() {
        let photos = vec![
            photo("p1", "A", 1),
            photo("p2", "B", 5),
            photo("p3", "A", 9),
            photo("p4", "A", 4),
        ];

        let listing = photos_in_album(&photos, "A");
        assert_eq!(
            listing.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p3", "p4", "p1"]
        );
    }

    #[test]
    fn test_unknown_album_yields_empty_listing() {
        let photos = vec![photo("p1", "A", 1)];
        assert!(photos_in_album(&photos, "B").is_empty());
    }
}
