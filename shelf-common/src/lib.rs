//! Shared configuration and error types for Comics Shelf crates

pub mod config;
pub mod error;

pub use config::{GeneratorMode, ShelfConfig, UploadFailurePolicy};
pub use error::{Error, Result};
