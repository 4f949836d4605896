//! Completion client factory.
//!
//! Resolves the configured provider into a shared client. Provider `none`
//! yields no client, which callers treat as "generative features off".

use std::sync::Arc;
use std::time::Duration;

use agrigenius_core::config::LlmSettings;
use agrigenius_core::{AppError, AppResult};

use crate::client::LlmClient;
use crate::providers::{OllamaClient, TogetherClient};
use crate::types::ProviderType;

/// Create a completion client from settings.
///
/// # Errors
/// Returns error if the provider is unknown or a required API key is missing.
pub fn create_client(
    settings: &LlmSettings,
    api_key: Option<&str>,
) -> AppResult<Option<Arc<dyn LlmClient>>> {
    let provider = ProviderType::parse(&settings.provider).ok_or_else(|| {
        AppError::Config(format!("Unknown LLM provider: {}", settings.provider))
    })?;
    let timeout = Duration::from_secs(settings.timeout_secs.max(1));

    let client: Arc<dyn LlmClient> = match provider {
        ProviderType::Disabled => {
            tracing::info!("Completion provider disabled");
            return Ok(None);
        }
        ProviderType::Ollama => {
            let client = match settings.endpoint.as_deref() {
                Some(endpoint) => OllamaClient::with_base_url(endpoint),
                None => OllamaClient::new(),
            };
            Arc::new(client.with_model(&settings.model).with_timeout(timeout))
        }
        ProviderType::Together => {
            let key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
                AppError::Config(format!(
                    "Together provider requires an API key ({})",
                    settings.api_key_env
                ))
            })?;
            let client = match settings.endpoint.as_deref() {
                Some(endpoint) => TogetherClient::with_base_url(endpoint, key),
                None => TogetherClient::new(key),
            };
            Arc::new(client.with_model(&settings.model).with_timeout(timeout))
        }
    };

    tracing::debug!(
        provider = provider.as_str(),
        model = %settings.model,
        "Created completion client"
    );
    Ok(Some(client))
}
