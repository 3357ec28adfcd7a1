//! Record models
//!
//! Dates are assigned by the store at write time (CURRENT_TIMESTAMP),
//! never by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a quote request. Any status may follow any other; there is
/// no enforced transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Contacted,
    Completed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Contacted => "contacted",
            QuoteStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(QuoteStatus::Pending),
            "contacted" => Some(QuoteStatus::Contacted),
            "completed" => Some(QuoteStatus::Completed),
            _ => None,
        }
    }
}

/// Album category (service line of the business)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlbumCategory {
    Schilderwerk,
    Tuinieren,
    RamenWassen,
    AllerleiKlusjes,
}

impl AlbumCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumCategory::Schilderwerk => "schilderwerk",
            AlbumCategory::Tuinieren => "tuinieren",
            AlbumCategory::RamenWassen => "ramen-wassen",
            AlbumCategory::AllerleiKlusjes => "allerlei-klusjes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "schilderwerk" => Some(AlbumCategory::Schilderwerk),
            "tuinieren" => Some(AlbumCategory::Tuinieren),
            "ramen-wassen" => Some(AlbumCategory::RamenWassen),
            "allerlei-klusjes" => Some(AlbumCategory::AllerleiKlusjes),
            _ => None,
        }
    }
}

/// Quote request from the public form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub description: String,
    pub submitted_date: DateTime<Utc>,
    pub status: QuoteStatus,
}

/// Photo album. The stored photo_count is written as 0 at creation and is
/// never authoritative; counts are recomputed from the photos collection
/// on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub category: AlbumCategory,
    pub created_date: DateTime<Utc>,
    pub photo_count: i64,
}

/// Portfolio photo. Associated to an album iff album_name byte-equals
/// some album's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub image_url: String,
    pub album_name: String,
    pub upload_date: DateTime<Utc>,
    pub cdn_public_id: Option<String>,
}

/// Client review (read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub client_name: String,
    pub service: String,
    pub rating: i64,
    pub comment: String,
    pub date: DateTime<Utc>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["pending", "contacted", "completed"] {
            assert_eq!(QuoteStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(QuoteStatus::parse("archived").is_none());
    }

    #[test]
    fn test_category_round_trip() {
        for s in ["schilderwerk", "tuinieren", "ramen-wassen", "allerlei-klusjes"] {
            assert_eq!(AlbumCategory::parse(s).unwrap().as_str(), s);
        }
        assert!(AlbumCategory::parse("overig").is_none());
    }

    #[test]
    fn test_category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&AlbumCategory::RamenWassen).unwrap();
        assert_eq!(json, "\"ramen-wassen\"");
    }
}
