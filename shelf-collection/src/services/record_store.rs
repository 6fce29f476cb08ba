//! Record store client
//!
//! CRUD against the remote document collection that is the sole source of
//! truth for [`ComicRecord`]s. Documents are schemaless key/value maps
//! addressed by database id + collection id; creation supplies a
//! client-generated unique document id.

use crate::models::{ComicFields, ComicRecord};
use async_trait::async_trait;
use serde_json::{json, Value};
use shelf_common::config::RecordStoreConfig;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

const USER_AGENT: &str = "ComicsShelf/0.1.0";

/// Record store client errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Remote document-collection contract the orchestrator persists through
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, fields: &ComicFields) -> Result<ComicRecord, StoreError>;
    async fn update(&self, id: &str, fields: &ComicFields) -> Result<ComicRecord, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<ComicRecord>, StoreError>;
}

/// HTTP record store client
pub struct RecordStoreClient {
    http_client: reqwest::Client,
    config: RecordStoreConfig,
}

impl RecordStoreClient {
    pub fn new(config: RecordStoreConfig, timeout: Duration) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database_id, self.config.collection_id
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), id)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Shelf-Project", &self.config.project_id)
            .header("X-Shelf-Key", &self.config.api_key)
    }

    async fn read_record(response: reqwest::Response) -> Result<ComicRecord, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), error_text));
        }
        response
            .json::<ComicRecord>()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for RecordStoreClient {
    async fn create(&self, fields: &ComicFields) -> Result<ComicRecord, StoreError> {
        let document_id = Uuid::new_v4().to_string();
        let body = json!({
            "document_id": document_id,
            "data": fields,
        });

        tracing::debug!(document_id = %document_id, "Creating comic document");

        let response = self
            .authed(self.http_client.post(self.documents_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let record = Self::read_record(response).await?;
        tracing::info!(id = %record.id, title = %record.title, "Comic record created");
        Ok(record)
    }

    async fn update(&self, id: &str, fields: &ComicFields) -> Result<ComicRecord, StoreError> {
        let body = json!({ "data": fields });

        tracing::debug!(id = %id, "Updating comic document");

        let response = self
            .authed(self.http_client.patch(self.document_url(id)))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let record = Self::read_record(response).await?;
        tracing::info!(id = %record.id, "Comic record updated");
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .authed(self.http_client.delete(self.document_url(id)))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), error_text));
        }

        tracing::info!(id = %id, "Comic record deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ComicRecord>, StoreError> {
        let response = self
            .authed(self.http_client.get(self.documents_url()))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(status.as_u16(), error_text));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(records_from_payload(payload))
    }
}

/// Extract records from a list payload, normalizing malformed responses
/// (missing `documents` field) to an empty list instead of failing.
fn records_from_payload(payload: Value) -> Vec<ComicRecord> {
    let Some(documents) = payload.get("documents").and_then(Value::as_array) else {
        tracing::warn!("List response missing documents field, treating as empty");
        return Vec::new();
    };

    let mut records = Vec::with_capacity(documents.len());
    for document in documents {
        match serde_json::from_value::<ComicRecord>(document.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable document in list response");
            }
        }
    }
    records
}
