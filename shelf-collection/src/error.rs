//! Submission error taxonomy
//!
//! Service clients never swallow failures; they convert transport and
//! parse problems into their own typed error, and those aggregate here.
//! The orchestrator is the only layer that swallows anything, and only
//! where the workflow policy says a step is best-effort.

use crate::services::{GenerationError, StoreError, UploadError};
use thiserror::Error;

/// Result type for submission workflow operations
pub type SubmissionResult<T> = std::result::Result<T, SubmissionError>;

/// Errors surfaced by the submission workflow
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Bad user input; recoverable by re-prompting. Issued before any
    /// network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Description step failed. Recovered internally by substituting an
    /// empty description; surfaces only if a caller invokes a generator
    /// directly.
    #[error("Description generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Cover upload failed; fatal under the default policy
    #[error("Cover upload failed: {0}")]
    Upload(#[from] UploadError),

    /// Record store call failed; always fatal
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}
