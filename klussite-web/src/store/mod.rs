//! Record store adapter
//!
//! Thin per-collection CRUD over the SQLite pool. Identifiers are
//! generated UUIDs; dates come from the store (CURRENT_TIMESTAMP).
//!
//! The photos collection is always read in full: the album/photo join is
//! performed in memory by the gallery layer, never with a SQL WHERE
//! clause, and album ordering is likewise applied after the fetch.

pub mod albums;
pub mod photos;
pub mod quotes;
pub mod reviews;
