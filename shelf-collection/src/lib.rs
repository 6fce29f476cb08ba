//! Comics Shelf collection core
//!
//! Orchestrates comic-record submissions against three remote services:
//! the record store (document persistence), the asset upload service
//! (cover images), and a pluggable description generator. The host UI
//! embeds [`SubmissionOrchestrator`] and drives it from user actions;
//! everything here is headless.

pub mod error;
pub mod models;
pub mod services;

pub use error::{SubmissionError, SubmissionResult};
pub use models::{
    ComicEdits, ComicFields, ComicRecord, ComicStatus, LocalImage, SubmissionForm,
    SubmissionState,
};
pub use services::SubmissionOrchestrator;
