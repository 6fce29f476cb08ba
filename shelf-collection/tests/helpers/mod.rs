//! In-memory fakes for the three service capabilities, with call counting
//! so tests can assert which network steps were (not) attempted.

use async_trait::async_trait;
use chrono::Utc;
use shelf_collection::models::{ComicFields, ComicRecord, ComicStatus, LocalImage};
use shelf_collection::services::{
    AssetUploader, DescriptionGenerator, DescriptionRequest, GenerationError, RecordStore,
    StoreError, UploadError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fake record store backed by a Vec
#[derive(Default)]
pub struct FakeStore {
    pub records: Mutex<Vec<ComicRecord>>,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub fail_create: bool,
}

impl FakeStore {
    pub fn created(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn create(&self, fields: &ComicFields) -> Result<ComicRecord, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(StoreError::Api(500, "store down".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        let record = ComicRecord {
            id: format!("comic-{}", records.len() + 1),
            title: fields.title.clone().unwrap_or_default(),
            status: fields.status.unwrap_or(ComicStatus::ToRead),
            rating: fields.rating.unwrap_or(0),
            cover_image: fields.cover_image.clone(),
            description: fields.description.clone().unwrap_or_default(),
            created_at: fields.created_at.unwrap_or_else(Utc::now),
            updated_at: fields.updated_at.unwrap_or_else(Utc::now),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, fields: &ComicFields) -> Result<ComicRecord, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::Api(404, format!("unknown document {id}")))?;

        if let Some(title) = &fields.title {
            record.title = title.clone();
        }
        if let Some(status) = fields.status {
            record.status = status;
        }
        if let Some(rating) = fields.rating {
            record.rating = rating;
        }
        if let Some(cover) = &fields.cover_image {
            record.cover_image = Some(cover.clone());
        }
        if let Some(description) = &fields.description {
            record.description = description.clone();
        }
        if let Some(updated_at) = fields.updated_at {
            record.updated_at = updated_at;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::Api(404, format!("unknown document {id}")));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ComicRecord>, StoreError> {
        Ok(self.records.lock().unwrap().clone())
    }
}

/// Fake uploader returning a fixed URL or a fixed failure
pub struct FakeUploader {
    pub url: String,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeUploader {
    pub fn succeeding(url: &str) -> Self {
        Self {
            url: url.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            url: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn called(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetUploader for FakeUploader {
    async fn upload(&self, _image: &LocalImage) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UploadError::Api(400, "invalid preset".to_string()));
        }
        Ok(self.url.clone())
    }
}

/// Fake generator recording the requests it receives
#[derive(Default)]
pub struct FakeGenerator {
    pub text: String,
    pub fail: bool,
    pub requests: Mutex<Vec<DescriptionRequest>>,
}

impl FakeGenerator {
    pub fn succeeding(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn called(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl DescriptionGenerator for FakeGenerator {
    async fn generate(&self, request: &DescriptionRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(GenerationError::Api("model overloaded".to_string()));
        }
        Ok(self.text.clone())
    }
}
