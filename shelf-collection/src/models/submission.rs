//! Submission input types and the UI-facing submission state machine
//!
//! State progression: IDLE → SUBMITTING → SUCCESS | FAILED

use crate::models::ComicStatus;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Device-local image reference, not yet uploaded. The file extension
/// drives the upload MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub path: PathBuf,
}

impl LocalImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// One add-comic form as entered; exists only for the duration of a single
/// submission and is never persisted.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub title: String,
    pub status: ComicStatus,
    /// Rating as typed; parsed to an integer during validation
    pub rating_input: String,
    pub cover_image: Option<LocalImage>,
}

/// Edited fields for an update submission. `description: None` leaves the
/// stored description unchanged.
#[derive(Debug, Clone)]
pub struct ComicEdits {
    pub title: String,
    pub status: ComicStatus,
    pub rating_input: String,
    pub description: Option<String>,
}

/// Observable submission state, published for progress display. The
/// `generating_description` flag is cosmetic only; it carries no
/// behavioral effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", tag = "state")]
pub enum SubmissionState {
    Idle,
    Submitting { generating_description: bool },
    Success,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(
            LocalImage::new("/tmp/cover.PNG").extension().as_deref(),
            Some("png")
        );
        assert_eq!(LocalImage::new("/tmp/cover").extension(), None);
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(SubmissionState::Submitting {
            generating_description: true,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "SUBMITTING", "generating_description": true })
        );
    }
}
