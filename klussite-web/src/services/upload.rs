//! Multi-file upload pipeline
//!
//! Takes an ordered batch of files and a target album name. The whole
//! batch is validated up front (size ceiling, image media type); any
//! rejection aborts the batch before a single network call. Files then
//! upload strictly sequentially, and every successful CDN upload is
//! immediately followed by a photo record insert, so a failure partway
//! through leaves earlier files persisted. The first CDN failure aborts
//! the rest of the batch, resets progress to 0 and reports a failed
//! terminal state. No retries.
//!
//! Progress is a stage-based approximation, not byte-level transfer
//! progress: file i of n owns the slice [i/n, (i+1)/n] of the bar and
//! advances through fixed checkpoints within it.

use klussite_common::db::models::Photo;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

use crate::services::image_host::{ImageHost, ImageHostError, UploadFile};
use crate::store;

/// Per-file size ceiling (10 MiB)
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Fractional checkpoints within one file's progress slice
const CHECKPOINT_PREPARED: f64 = 0.1;
const CHECKPOINT_REQUEST_ASSEMBLED: f64 = 0.3;
const CHECKPOINT_TRANSFERRED: f64 = 0.6;
const CHECKPOINT_REMOTE_DONE: f64 = 0.8;

/// Batch lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    /// Batch accepted, nothing uploaded yet
    Pending,
    Uploading,
    Completed,
    Failed,
}

/// Progress snapshot published over the watch channel
#[derive(Debug, Clone, Serialize)]
pub struct BatchProgress {
    pub state: UploadState,
    /// 0.0 - 100.0; reaches exactly 100 only on full completion
    pub percent: f64,
    /// 1-based index of the file currently uploading (0 before start)
    pub current_file: usize,
    pub total_files: usize,
    /// Human-readable failure description for the failed state
    pub error: Option<String>,
}

impl BatchProgress {
    pub fn pending(total_files: usize) -> Self {
        Self {
            state: UploadState::Pending,
            percent: 0.0,
            current_file: 0,
            total_files,
            error: None,
        }
    }
}

/// Destination for progress snapshots. The HTTP layer publishes into a
/// watch channel polled by the status endpoint; tests record the full
/// history.
pub trait ProgressSink {
    fn publish(&self, progress: BatchProgress);
}

impl ProgressSink for watch::Sender<BatchProgress> {
    fn publish(&self, progress: BatchProgress) {
        self.send_replace(progress);
    }
}

/// Upload pipeline errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload batch is empty")]
    EmptyBatch,

    #[error("Bestand {filename} is te groot. Maximaal 10MB toegestaan.")]
    FileTooLarge { filename: String },

    #[error("{filename} is geen afbeelding. Alleen afbeeldingen zijn toegestaan.")]
    NotAnImage { filename: String },

    #[error("Upload failed for {filename}: {source}")]
    Host {
        filename: String,
        #[source]
        source: ImageHostError,
    },

    #[error("Store error: {0}")]
    Store(#[from] klussite_common::Error),
}

impl UploadError {
    /// Validation errors are detected before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UploadError::EmptyBatch
                | UploadError::FileTooLarge { .. }
                | UploadError::NotAnImage { .. }
        )
    }
}

/// Validate the whole batch before any upload begins. All-or-nothing:
/// one bad file rejects the batch, naming the offending file.
pub fn validate_batch(files: &[UploadFile]) -> Result<(), UploadError> {
    if files.is_empty() {
        return Err(UploadError::EmptyBatch);
    }
    for file in files {
        if file.bytes.len() > MAX_FILE_BYTES {
            return Err(UploadError::FileTooLarge {
                filename: file.filename.clone(),
            });
        }
        if !file.content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage {
                filename: file.filename.clone(),
            });
        }
    }
    Ok(())
}

/// Sequential upload pipeline over an image host and the photo store
pub struct UploadPipeline<'a, H: ImageHost> {
    host: &'a H,
    db: &'a SqlitePool,
}

impl<'a, H: ImageHost> UploadPipeline<'a, H> {
    pub fn new(host: &'a H, db: &'a SqlitePool) -> Self {
        Self { host, db }
    }

    /// Run the batch to completion. Progress snapshots are published on
    /// the given sink, ending in a terminal Completed or Failed state.
    /// Returns the persisted photos on success.
    pub async fn run(
        &self,
        album_name: &str,
        files: &[UploadFile],
        progress: &impl ProgressSink,
    ) -> Result<Vec<Photo>, UploadError> {
        // Whole-batch precondition check; zero network calls on failure
        if let Err(err) = validate_batch(files) {
            progress.publish(BatchProgress {
                state: UploadState::Failed,
                percent: 0.0,
                current_file: 0,
                total_files: files.len(),
                error: Some(err.to_string()),
            });
            return Err(err);
        }

        let total = files.len();
        info!(album = %album_name, files = total, "Starting upload batch");

        let mut persisted = Vec::with_capacity(total);
        let mut completed = 0usize;

        for (i, file) in files.iter().enumerate() {
            let base = (completed as f64 / total as f64) * 100.0;
            let slice = 100.0 / total as f64;
            let at = |fraction: f64| BatchProgress {
                state: UploadState::Uploading,
                percent: base + slice * fraction,
                current_file: i + 1,
                total_files: total,
                error: None,
            };

            progress.publish(at(CHECKPOINT_PREPARED));
            progress.publish(at(CHECKPOINT_REQUEST_ASSEMBLED));

            let uploaded = match self.host.upload(file, album_name).await {
                Ok(uploaded) => uploaded,
                Err(source) => {
                    // Abort the remaining batch; earlier files stay persisted
                    error!(
                        album = %album_name,
                        file = %file.filename,
                        error = %source,
                        "Upload failed, aborting batch"
                    );
                    let err = UploadError::Host {
                        filename: file.filename.clone(),
                        source,
                    };
                    progress.publish(BatchProgress {
                        state: UploadState::Failed,
                        percent: 0.0,
                        current_file: i + 1,
                        total_files: total,
                        error: Some(err.to_string()),
                    });
                    return Err(err);
                }
            };

            progress.publish(at(CHECKPOINT_TRANSFERRED));
            progress.publish(at(CHECKPOINT_REMOTE_DONE));

            // Persist immediately, before the next file starts
            let photo = store::photos::insert(
                self.db,
                &uploaded.url,
                album_name,
                Some(&uploaded.public_id),
            )
            .await?;
            persisted.push(photo);

            completed += 1;
            progress.publish(BatchProgress {
                state: if completed == total {
                    UploadState::Completed
                } else {
                    UploadState::Uploading
                },
                percent: (completed as f64 / total as f64) * 100.0,
                current_file: i + 1,
                total_files: total,
                error: None,
            });
        }

        info!(album = %album_name, files = total, "Upload batch completed");
        Ok(persisted)
    }
}
