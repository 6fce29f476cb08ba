//! Function-execution proxy backend
//!
//! Calls a server-side function that wraps the generation logic. The
//! execution envelope has accumulated two output fields over the API's
//! history (`response` and `responseBody`) and either may hold a JSON
//! string or an embedded object; all shapes normalize here, so the
//! orchestrator never inspects transport-specific payloads.

use super::{DescriptionGenerator, DescriptionRequest, GenerationError};
use async_trait::async_trait;
use serde_json::{json, Value};
use shelf_common::config::RecordStoreConfig;
use shelf_common::Error;
use std::time::Duration;

const USER_AGENT: &str = "ComicsShelf/0.1.0";

/// Generator proxied through the platform's function-execution API, which
/// shares the record store's endpoint and credentials.
pub struct FunctionProxyGenerator {
    http_client: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    function_id: String,
}

impl FunctionProxyGenerator {
    pub fn new(
        platform: &RecordStoreConfig,
        function_id: String,
        timeout: Duration,
    ) -> shelf_common::Result<Self> {
        if function_id.trim().is_empty() {
            return Err(Error::Config(
                "description function_id required for function mode".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: platform.endpoint.clone(),
            project_id: platform.project_id.clone(),
            api_key: platform.api_key.clone(),
            function_id,
        })
    }

    fn execution_url(&self) -> String {
        format!("{}/functions/{}/executions", self.endpoint, self.function_id)
    }
}

#[async_trait]
impl DescriptionGenerator for FunctionProxyGenerator {
    async fn generate(&self, request: &DescriptionRequest) -> Result<String, GenerationError> {
        request.ensure_complete()?;

        let data = json!({
            "title": request.title,
            "status": request.status,
            "rating": request.rating,
        });

        tracing::debug!(function_id = %self.function_id, title = %request.title, "Executing description function");

        let response = self
            .http_client
            .post(self.execution_url())
            .header("X-Shelf-Project", &self.project_id)
            .header("X-Shelf-Key", &self.api_key)
            .json(&json!({ "data": data.to_string() }))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api(format!("HTTP {status}: {error_text}")));
        }

        let execution: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let envelope = extract_envelope(&execution)?;
        description_from_envelope(&envelope)
    }
}

/// Pull the function output out of the execution wrapper, accepting both
/// `response` and `responseBody`, each as a JSON string or an object.
fn extract_envelope(execution: &Value) -> Result<Value, GenerationError> {
    let raw = execution
        .get("response")
        .filter(|v| !v.is_null())
        .or_else(|| execution.get("responseBody").filter(|v| !v.is_null()))
        .ok_or_else(|| {
            GenerationError::Parse("execution missing response and responseBody".to_string())
        })?;

    match raw {
        Value::String(text) => serde_json::from_str(text)
            .map_err(|e| GenerationError::Parse(format!("invalid envelope JSON: {e}"))),
        Value::Object(_) => Ok(raw.clone()),
        other => Err(GenerationError::Parse(format!(
            "unexpected envelope type: {other}"
        ))),
    }
}

/// Normalize the `{success, description?, error?}` envelope into text or a
/// failure signal.
fn description_from_envelope(envelope: &Value) -> Result<String, GenerationError> {
    if let Some(error) = envelope.get("error").and_then(Value::as_str) {
        return Err(GenerationError::Api(error.to_string()));
    }

    let success = envelope
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let description = envelope.get("description").and_then(Value::as_str);

    match (success, description) {
        (true, Some(text)) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(GenerationError::Parse(
            "envelope missing success/description".to_string(),
        )),
    }
}
