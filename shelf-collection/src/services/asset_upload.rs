//! Asset upload client
//!
//! Pushes a device-local cover image to the hosting/CDN service via a
//! multipart form and returns the canonical secure URL. Also derives
//! display-sized URL variants without touching the network.

use crate::models::LocalImage;
use async_trait::async_trait;
use serde_json::Value;
use shelf_common::config::AssetUploadConfig;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "ComicsShelf/0.1.0";

/// Asset upload client errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Image read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload rejected {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Image hosting contract used for cover uploads
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Upload a local image, returning the canonical asset URL
    async fn upload(&self, image: &LocalImage) -> Result<String, UploadError>;
}

/// HTTP asset upload client
pub struct AssetUploadClient {
    http_client: reqwest::Client,
    config: AssetUploadConfig,
}

impl AssetUploadClient {
    pub fn new(config: AssetUploadConfig, timeout: Duration) -> Result<Self, UploadError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/image/upload", self.config.endpoint)
    }
}

#[async_trait]
impl AssetUploader for AssetUploadClient {
    async fn upload(&self, image: &LocalImage) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(&image.path).await?;
        let extension = image.extension();
        let file_name = format!(
            "upload.{}",
            extension.as_deref().unwrap_or("jpg")
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime_for_extension(extension.as_deref()))
            .map_err(|e| UploadError::Parse(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        tracing::debug!(path = %image.path.display(), "Uploading cover image");

        let response = self
            .http_client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| UploadError::Parse(e.to_string()))?;

        // The backend reports some failures as 200 with an error object
        if let Some(message) = payload
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return Err(UploadError::Api(status.as_u16(), message.to_string()));
        }
        if !status.is_success() {
            return Err(UploadError::Api(status.as_u16(), payload.to_string()));
        }

        let secure_url = payload
            .get("secure_url")
            .and_then(Value::as_str)
            .ok_or_else(|| UploadError::Parse("upload response missing secure_url".to_string()))?;

        tracing::info!(url = %secure_url, "Cover image uploaded");
        Ok(secure_url.to_string())
    }
}

/// MIME type for the upload part, falling back to JPEG when the extension
/// is indeterminate.
fn mime_for_extension(extension: Option<&str>) -> String {
    match extension {
        None | Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some(ext) => format!("image/{ext}"),
    }
}

/// Derive a display-sized URL variant by inserting scale parameters after
/// the `/upload/` path segment. Pure string transformation: absent input
/// stays absent, reapplying with the same dimensions is a no-op, and URLs
/// without an `/upload/` segment pass through unchanged.
pub fn derive_display_url(url: Option<&str>, width: u32, height: u32) -> Option<String> {
    let url = url?;
    let transform = format!("/upload/w_{width},h_{height},c_scale/");
    if url.contains(&transform) {
        return Some(url.to_string());
    }
    Some(url.replacen("/upload/", &transform, 1))
}
