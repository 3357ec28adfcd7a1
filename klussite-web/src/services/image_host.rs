//! Image CDN client
//!
//! The CDN accepts unsigned multipart uploads (file + upload preset +
//! destination folder) and answers with a public retrieval URL and an
//! opaque identifier. Blobs are never deleted through this client; the
//! identifier is stored for out-of-band cleanup.

use axum::body::Bytes;
use klussite_common::config::ImageHostConfig;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// One file of an upload batch
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    /// Declared media type from the multipart part
    pub content_type: String,
    pub bytes: Bytes,
}

/// Successful CDN upload
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Public retrieval URL
    pub url: String,
    /// Opaque CDN identifier
    pub public_id: String,
}

/// Image CDN errors
#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Remote object upload endpoint
pub trait ImageHost {
    /// Upload one file into the given grouping folder (album name)
    fn upload(
        &self,
        file: &UploadFile,
        folder: &str,
    ) -> impl Future<Output = Result<UploadedImage, ImageHostError>> + Send;
}

/// Wire shape of the CDN upload response
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Cloudinary-style unsigned upload client
pub struct CloudinaryClient {
    http: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    folder_root: String,
}

impl CloudinaryClient {
    pub fn new(http: reqwest::Client, config: &ImageHostConfig) -> Self {
        Self {
            http,
            upload_url: config.upload_url(),
            upload_preset: config.upload_preset.clone(),
            folder_root: config.folder_root.clone(),
        }
    }

    /// Fresh client with a bounded request timeout
    pub fn with_timeout(config: &ImageHostConfig, timeout: Duration) -> Result<Self, ImageHostError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ImageHostError::Network(e.to_string()))?;
        Ok(Self::new(http, config))
    }
}

impl ImageHost for CloudinaryClient {
    async fn upload(&self, file: &UploadFile, folder: &str) -> Result<UploadedImage, ImageHostError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| ImageHostError::Parse(format!("Bad media type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", format!("{}/{}", self.folder_root, folder));

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageHostError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ImageHostError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageHostError::Parse(e.to_string()))?;

        Ok(UploadedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }
}
