//! Together AI completion provider.
//!
//! Uses the hosted `/v1/completions` endpoint with bearer authentication.

use std::time::Duration;

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use agrigenius_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.together.xyz";
const DEFAULT_MODEL: &str = "meta-llama/Llama-2-70b-chat-hf";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<LlmUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Together AI completion client.
#[derive(Debug)]
pub struct TogetherClient {
    base_url: String,
    api_key: ApiKey,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl TogetherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: ApiKey(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Together's completions endpoint has no system field; fold it into the prompt.
    fn render_prompt(request: &LlmRequest) -> String {
        match request.system {
            Some(ref system) => format!("{}\n\n{}", system, request.prompt),
            None => request.prompt.clone(),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for TogetherClient {
    fn provider_name(&self) -> &str {
        "together"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::debug!(model = %request.model, "Sending completion request to Together");

        let body = CompletionRequest {
            model: &request.model,
            prompt: Self::render_prompt(request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_k: request.top_k,
        };

        let url = format!("{}/v1/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key.0)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Together: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            tracing::warn!(status = %status, "Together API error");
            return Err(AppError::Llm(format!(
                "Together API error ({}): {}",
                status, snippet
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse Together response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text.trim().to_string())
            .ok_or_else(|| AppError::Llm("Together returned no choices".to_string()))?;

        Ok(LlmResponse {
            content,
            model: parsed.model.unwrap_or_else(|| request.model.clone()),
            usage: parsed.usage.unwrap_or_default(),
        })
    }
}
