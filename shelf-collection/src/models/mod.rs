//! Data models for the comics collection

pub mod comic;
pub mod submission;

pub use comic::{ComicFields, ComicRecord, ComicStatus};
pub use submission::{ComicEdits, LocalImage, SubmissionForm, SubmissionState};
