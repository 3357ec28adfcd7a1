//! Service layer: image CDN client, upload pipeline, gallery derivation,
//! album cascade deletion, quote notifications.

pub mod cascade;
pub mod gallery;
pub mod image_host;
pub mod notify;
pub mod upload;
