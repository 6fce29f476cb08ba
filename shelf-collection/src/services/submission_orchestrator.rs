//! Submission workflow orchestrator
//!
//! Coordinates one comic submission through its three external calls,
//! strictly in sequence:
//!
//! 1. description generation — best-effort; failure substitutes ""
//! 2. cover image upload — fatal by default, best-effort by policy opt-in
//! 3. record store persist — fatal, single attempt, no retry
//!
//! The three-step workflow is not atomic: a failure between upload and
//! persist can leave an orphaned uploaded asset. Accepted limitation.

use crate::error::{SubmissionError, SubmissionResult};
use crate::models::{
    ComicEdits, ComicFields, ComicRecord, ComicStatus, LocalImage, SubmissionForm,
    SubmissionState,
};
use crate::services::description::{
    DescriptionGenerator, DescriptionRequest, DirectApiGenerator, FunctionProxyGenerator,
    NullGenerator,
};
use crate::services::{AssetUploadClient, AssetUploader, RecordStore, RecordStoreClient};
use chrono::Utc;
use shelf_common::config::GeneratorMode;
use shelf_common::{Error, ShelfConfig, UploadFailurePolicy};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Submission workflow orchestrator
pub struct SubmissionOrchestrator {
    store: Arc<dyn RecordStore>,
    uploader: Arc<dyn AssetUploader>,
    generator: Arc<dyn DescriptionGenerator>,
    upload_failure_policy: UploadFailurePolicy,
    state_tx: watch::Sender<SubmissionState>,
}

impl SubmissionOrchestrator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        uploader: Arc<dyn AssetUploader>,
        generator: Arc<dyn DescriptionGenerator>,
        upload_failure_policy: UploadFailurePolicy,
    ) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        Self {
            store,
            uploader,
            generator,
            upload_failure_policy,
            state_tx,
        }
    }

    /// Build the orchestrator with HTTP clients from explicit configuration
    pub fn from_config(config: &ShelfConfig) -> shelf_common::Result<Self> {
        let timeout = Duration::from_secs(config.http.timeout_secs);

        let store = RecordStoreClient::new(config.record_store.clone(), timeout)
            .map_err(|e| Error::Internal(e.to_string()))?;
        let uploader = AssetUploadClient::new(config.asset_upload.clone(), timeout)
            .map_err(|e| Error::Internal(e.to_string()))?;

        let generator: Arc<dyn DescriptionGenerator> = match config.description.mode {
            GeneratorMode::Direct => {
                Arc::new(DirectApiGenerator::new(&config.description, timeout)?)
            }
            GeneratorMode::Function => Arc::new(FunctionProxyGenerator::new(
                &config.record_store,
                config.description.function_id.clone(),
                timeout,
            )?),
            GeneratorMode::Disabled => {
                tracing::info!("Description generation disabled");
                Arc::new(NullGenerator)
            }
        };

        Ok(Self::new(
            Arc::new(store),
            Arc::new(uploader),
            generator,
            config.submission.upload_failure_policy,
        ))
    }

    /// Observe submission progress for display. State carries no
    /// behavioral effect.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, state: SubmissionState) {
        self.state_tx.send_replace(state);
    }

    /// Create a comic record from one submitted form.
    ///
    /// Validation failures leave the state machine in `Idle` and issue no
    /// network calls.
    pub async fn create(&self, form: &SubmissionForm) -> SubmissionResult<ComicRecord> {
        let title = validated_title(&form.title)?;
        let rating = validated_rating(form.status, &form.rating_input)?;

        self.set_state(SubmissionState::Submitting {
            generating_description: false,
        });

        let result = self.create_validated(form, title, rating).await;
        match &result {
            Ok(record) => {
                self.set_state(SubmissionState::Success);
                tracing::info!(id = %record.id, title = %record.title, "Submission completed");
            }
            Err(e) => {
                self.set_state(SubmissionState::Failed);
                tracing::error!(error = %e, "Submission failed");
            }
        }
        result
    }

    async fn create_validated(
        &self,
        form: &SubmissionForm,
        title: String,
        rating: u8,
    ) -> SubmissionResult<ComicRecord> {
        let description = self.generate_description(&title, form.status, rating).await;
        let cover_image = self.upload_cover(form.cover_image.as_ref()).await?;

        let now = Utc::now();
        let fields = ComicFields {
            title: Some(title),
            status: Some(form.status),
            rating: Some(rating),
            cover_image,
            description: Some(description),
            created_at: Some(now),
            updated_at: Some(now),
        };

        Ok(self.store.create(&fields).await?)
    }

    /// Update an existing comic record. A newly chosen cover image is
    /// uploaded under the same failure policy as create; without one the
    /// stored cover is left untouched.
    pub async fn update(
        &self,
        id: &str,
        edits: &ComicEdits,
        new_image: Option<&LocalImage>,
    ) -> SubmissionResult<ComicRecord> {
        let title = validated_title(&edits.title)?;
        let rating = validated_rating(edits.status, &edits.rating_input)?;

        self.set_state(SubmissionState::Submitting {
            generating_description: false,
        });

        let result = self
            .update_validated(id, edits, new_image, title, rating)
            .await;
        match &result {
            Ok(record) => {
                self.set_state(SubmissionState::Success);
                tracing::info!(id = %record.id, "Update completed");
            }
            Err(e) => {
                self.set_state(SubmissionState::Failed);
                tracing::error!(id = %id, error = %e, "Update failed");
            }
        }
        result
    }

    async fn update_validated(
        &self,
        id: &str,
        edits: &ComicEdits,
        new_image: Option<&LocalImage>,
        title: String,
        rating: u8,
    ) -> SubmissionResult<ComicRecord> {
        let cover_image = self.upload_cover(new_image).await?;

        let fields = ComicFields {
            title: Some(title),
            status: Some(edits.status),
            rating: Some(rating),
            cover_image,
            description: edits.description.clone(),
            created_at: None,
            updated_at: Some(Utc::now()),
        };

        Ok(self.store.update(id, &fields).await?)
    }

    /// Delete a comic record. Confirmation is a caller concern.
    pub async fn delete(&self, id: &str) -> SubmissionResult<()> {
        Ok(self.store.delete(id).await?)
    }

    /// Fetch the full collection from the record store
    pub async fn list(&self) -> SubmissionResult<Vec<ComicRecord>> {
        Ok(self.store.list().await?)
    }

    /// Best-effort description step. Any generator failure is logged and
    /// substituted with empty text; this step never aborts a submission.
    async fn generate_description(&self, title: &str, status: ComicStatus, rating: u8) -> String {
        self.set_state(SubmissionState::Submitting {
            generating_description: true,
        });

        let request = DescriptionRequest::new(title, status, rating);
        let description = match self.generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Description generation failed, continuing without");
                String::new()
            }
        };

        self.set_state(SubmissionState::Submitting {
            generating_description: false,
        });
        description
    }

    /// Cover upload step. Failure handling follows the configured policy:
    /// fatal aborts the submission before any record is written,
    /// best-effort continues without a cover.
    async fn upload_cover(
        &self,
        image: Option<&LocalImage>,
    ) -> SubmissionResult<Option<String>> {
        let Some(image) = image else {
            return Ok(None);
        };

        match self.uploader.upload(image).await {
            Ok(url) => Ok(Some(url)),
            Err(e) => match self.upload_failure_policy {
                UploadFailurePolicy::Fatal => Err(e.into()),
                UploadFailurePolicy::BestEffort => {
                    tracing::warn!(error = %e, "Cover upload failed, continuing without cover");
                    Ok(None)
                }
            },
        }
    }
}

/// Title must be non-empty after trimming
fn validated_title(title: &str) -> SubmissionResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SubmissionError::Validation(
            "title must not be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

/// Read comics need a 1-5 integer rating; to-read comics always persist 0
/// regardless of what was typed.
fn validated_rating(status: ComicStatus, rating_input: &str) -> SubmissionResult<u8> {
    match status {
        ComicStatus::ToRead => Ok(0),
        ComicStatus::Read => rating_input
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|rating| (1..=5).contains(rating))
            .ok_or_else(|| {
                SubmissionError::Validation(
                    "rating must be an integer between 1 and 5".to_string(),
                )
            }),
    }
}
