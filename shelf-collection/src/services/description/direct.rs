//! Direct generative-language API backend

use super::{build_prompt, DescriptionGenerator, DescriptionRequest, GenerationError};
use async_trait::async_trait;
use serde_json::{json, Value};
use shelf_common::config::DescriptionConfig;
use shelf_common::Error;
use std::time::Duration;

const USER_AGENT: &str = "ComicsShelf/0.1.0";

/// Generator calling the generative-language REST API directly
pub struct DirectApiGenerator {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl DirectApiGenerator {
    pub fn new(config: &DescriptionConfig, timeout: Duration) -> shelf_common::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("description api_key required for direct mode".to_string())
            })?;

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl DescriptionGenerator for DirectApiGenerator {
    async fn generate(&self, request: &DescriptionRequest) -> Result<String, GenerationError> {
        request.ensure_complete()?;

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(request) }] }],
        });

        tracing::debug!(model = %self.model, title = %request.title, "Requesting generated description");

        let response = self
            .http_client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        if let Some(message) = payload
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return Err(GenerationError::Api(message.to_string()));
        }
        if !status.is_success() {
            return Err(GenerationError::Api(format!("HTTP {status}")));
        }

        text_from_candidates(&payload)
    }
}

/// Pull the generated text out of the `candidates` response shape
fn text_from_candidates(payload: &Value) -> Result<String, GenerationError> {
    payload
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.pointer("/content/parts/0/text"))
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| GenerationError::Parse("response missing candidate text".to_string()))
}
