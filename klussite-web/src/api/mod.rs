//! HTTP API handlers

pub mod albums;
pub mod auth;
pub mod health;
pub mod photos;
pub mod quotes;
pub mod reviews;
pub mod ui;
