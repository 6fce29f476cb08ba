//! Description generator capability
//!
//! Generating a comic description is best-effort and backend-agnostic: the
//! orchestrator only sees the [`DescriptionGenerator`] trait. Variants are
//! selected at configuration time:
//! - [`DirectApiGenerator`] — direct call to the generative-language API
//! - [`FunctionProxyGenerator`] — server-side function wrapping the same
//!   generation logic
//! - [`NullGenerator`] — generation disabled

pub mod direct;
pub mod function_proxy;

pub use direct::DirectApiGenerator;
pub use function_proxy::FunctionProxyGenerator;

use crate::models::ComicStatus;
use async_trait::async_trait;
use thiserror::Error;

/// Description generator errors. Every transport failure, malformed
/// payload, and application-level error field collapses into this one
/// type so callers can treat the whole step as best-effort.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Generation failed: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Structured generation parameters. Construction trims the title and
/// normalizes the rating to 0 unless the comic has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionRequest {
    pub title: String,
    pub status: ComicStatus,
    pub rating: u8,
}

impl DescriptionRequest {
    pub fn new(title: &str, status: ComicStatus, rating: u8) -> Self {
        let rating = match status {
            ComicStatus::Read => rating,
            ComicStatus::ToRead => 0,
        };
        Self {
            title: title.trim().to_string(),
            status,
            rating,
        }
    }

    /// Precondition check performed by every backend before any network
    /// call is attempted.
    pub(crate) fn ensure_complete(&self) -> Result<(), GenerationError> {
        if self.title.is_empty() {
            return Err(GenerationError::MissingField("title"));
        }
        Ok(())
    }
}

/// Text-generation capability the orchestrator invokes best-effort
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(&self, request: &DescriptionRequest) -> Result<String, GenerationError>;
}

/// No-op generator used when description generation is disabled. Returns
/// empty text, which the data model treats as "no description".
pub struct NullGenerator;

#[async_trait]
impl DescriptionGenerator for NullGenerator {
    async fn generate(&self, _request: &DescriptionRequest) -> Result<String, GenerationError> {
        Ok(String::new())
    }
}

/// Prompt shared by generation backends
pub(crate) fn build_prompt(request: &DescriptionRequest) -> String {
    let mut prompt = format!(
        "Generate a brief, engaging description for a comic book with the following details:\n\
         Title: {}\n\
         Reading Status: {}\n",
        request.title, request.status
    );
    if request.rating > 0 {
        prompt.push_str(&format!("Rating: {}/5\n", request.rating));
    }
    prompt.push_str(
        "\nPlease focus on making it sound interesting and inviting. Keep it under 250 characters.",
    );
    prompt
}
