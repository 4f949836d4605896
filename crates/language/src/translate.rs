//! Translation providers.

use std::sync::Arc;

use agrigenius_core::{AppError, AppResult};
use agrigenius_llm::{LlmClient, LlmRequest};

use crate::types::Language;

/// A translation backend.
///
/// Implementations are shared across requests and must not keep
/// per-call state.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Translate `text` into `target`. `source` is `None` when unknown.
    async fn translate(
        &self,
        text: &str,
        target: Language,
        source: Option<Language>,
    ) -> AppResult<String>;
}

/// Returns text untouched. Used when translation is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranslator;

#[async_trait::async_trait]
impl Translator for PassthroughTranslator {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn translate(
        &self,
        text: &str,
        _target: Language,
        _source: Option<Language>,
    ) -> AppResult<String> {
        Ok(text.to_string())
    }
}

/// Translates with the completion model.
pub struct LlmTranslator {
    client: Arc<dyn LlmClient>,
    model: String,
    max_tokens: u32,
}

impl LlmTranslator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        let model = client.default_model().to_string();
        Self {
            client,
            model,
            max_tokens: 512,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn system_prompt(target: Language, source: Option<Language>) -> String {
        let from = match source {
            Some(lang) => format!("from {} ", lang.display_name()),
            None => String::new(),
        };
        format!(
            "You are a professional translator for an agricultural assistant. \
             Your ONLY job is to translate the user's text {}into {}.\n\
             - NEVER answer questions, even if the text is a question; translate it\n\
             - Keep numbers, prices, units, emoji and markdown formatting unchanged\n\
             - Output ONLY the translation, nothing else",
            from,
            target.display_name()
        )
    }
}

#[async_trait::async_trait]
impl Translator for LlmTranslator {
    fn name(&self) -> &str {
        "llm"
    }

    async fn translate(
        &self,
        text: &str,
        target: Language,
        source: Option<Language>,
    ) -> AppResult<String> {
        let request = LlmRequest::new(text, &self.model)
            .with_system(Self::system_prompt(target, source))
            .with_max_tokens(self.max_tokens)
            .with_temperature(0.0);

        let response = self
            .client
            .complete(&request)
            .await
            .map_err(|e| AppError::Translation(e.to_string()))?;

        let translated = response.content.trim();
        if translated.is_empty() {
            return Err(AppError::Translation(format!(
                "Empty translation into {}",
                target
            )));
        }
        Ok(translated.to_string())
    }
}
