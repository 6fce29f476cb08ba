//! Service clients and the submission workflow

pub mod asset_upload;
pub mod description;
pub mod record_store;
pub mod submission_orchestrator;

pub use asset_upload::{derive_display_url, AssetUploadClient, AssetUploader, UploadError};
pub use description::{
    DescriptionGenerator, DescriptionRequest, DirectApiGenerator, FunctionProxyGenerator,
    GenerationError, NullGenerator,
};
pub use record_store::{RecordStore, RecordStoreClient, StoreError};
pub use submission_orchestrator::SubmissionOrchestrator;
