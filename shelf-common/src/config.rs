//! Configuration loading for Comics Shelf
//!
//! All remote-service identifiers (endpoints, project/database/collection
//! ids, API keys) live in one explicit `ShelfConfig` struct handed to each
//! client constructor at startup; there is no ambient global state.
//!
//! Resolution priority per value:
//! 1. Environment variable (secrets only)
//! 2. TOML config file (`SHELF_CONFIG` or the platform config directory)
//! 3. Compiled default

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, one section per remote service plus
/// submission policy and HTTP tuning.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub record_store: RecordStoreConfig,
    pub asset_upload: AssetUploadConfig,
    pub description: DescriptionConfig,
    pub submission: SubmissionConfig,
    pub http: HttpConfig,
}

/// Remote document-collection service holding comic records
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RecordStoreConfig {
    /// Base URL of the document API, e.g. `https://cloud.example.com/v1`
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
}

/// Image hosting/CDN upload endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetUploadConfig {
    /// Base URL of the upload API, e.g. `https://api.cdn.example.com/v1_1/<cloud>`
    pub endpoint: String,
    /// Unsigned upload profile identifier
    pub upload_preset: String,
}

impl Default for AssetUploadConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            upload_preset: "comics_shelf".to_string(),
        }
    }
}

/// Which description-generator backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorMode {
    /// Direct call to the generative-language API
    Direct,
    /// Server-side function wrapping the same generation logic
    Function,
    /// Description generation turned off
    Disabled,
}

/// Description generator selection and credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DescriptionConfig {
    pub mode: GeneratorMode,
    /// Generative-language API endpoint (direct mode)
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Function id used by the function-execution proxy
    pub function_id: String,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            mode: GeneratorMode::Disabled,
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            model: "gemini-2.5-pro-preview-03-25".to_string(),
            function_id: "comics_description_ai".to_string(),
        }
    }
}

/// What happens to a submission when the cover-image upload fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadFailurePolicy {
    /// Abort the submission; no record is created (default)
    #[default]
    Fatal,
    /// Continue without a cover image
    BestEffort,
}

/// Submission workflow policy knobs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub upload_failure_policy: UploadFailurePolicy,
}

/// HTTP client tuning shared by all service clients
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout applied to every external call
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl ShelfConfig {
    /// Load configuration following the documented priority order.
    ///
    /// A missing config file is not an error; every section has compiled
    /// defaults. A file that exists but fails to parse is an error.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))
    }

    /// Secrets may be supplied via environment instead of the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("SHELF_RECORD_STORE_API_KEY") {
            if !key.trim().is_empty() {
                tracing::info!("record store API key loaded from environment");
                self.record_store.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("SHELF_DESCRIPTION_API_KEY") {
            if !key.trim().is_empty() {
                tracing::info!("description API key loaded from environment");
                self.description.api_key = Some(key);
            }
        }
    }
}

/// Config file resolution: `SHELF_CONFIG` env var, then the platform
/// config directory.
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SHELF_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("comics-shelf").join("config.toml"))
}
