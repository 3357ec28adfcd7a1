//! # Klussite Common Library
//!
//! Shared code for the klussite service:
//! - Record models (albums, photos, quotes, reviews)
//! - Database initialization and schema
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
