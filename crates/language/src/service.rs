//! The language service used by the query pipeline.

use std::sync::Arc;
use std::time::Duration;

use crate::detect::detect_language;
use crate::glossary::apply_glossary;
use crate::greetings::greeting_for;
use crate::translate::{PassthroughTranslator, Translator};
use crate::types::{Language, LanguageOption};

/// Detection, translation and localization in one place.
///
/// Translation never fails from the caller's point of view: provider errors
/// and timeouts are logged and the original text is returned.
#[derive(Clone)]
pub struct LanguageService {
    translator: Arc<dyn Translator>,
    timeout: Duration,
}

impl LanguageService {
    pub fn new(translator: Arc<dyn Translator>, timeout: Duration) -> Self {
        Self {
            translator,
            timeout,
        }
    }

    /// A service that detects languages but never translates.
    pub fn passthrough() -> Self {
        Self::new(Arc::new(PassthroughTranslator), Duration::from_secs(1))
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    /// Detect the language of `text`, defaulting to English.
    pub fn detect(&self, text: &str) -> Language {
        detect_language(text)
    }

    /// Translate `text` into `target`.
    ///
    /// Identical source and target return the input without calling the
    /// provider.
    pub async fn translate(
        &self,
        text: &str,
        target: Language,
        source: Option<Language>,
    ) -> String {
        if source == Some(target) || text.trim().is_empty() {
            return text.to_string();
        }

        let call = self.translator.translate(text, target, source);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(translated)) => translated,
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = self.translator.name(),
                    target = %target,
                    error = %e,
                    "Translation failed, keeping original text"
                );
                text.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.translator.name(),
                    target = %target,
                    timeout_secs = self.timeout.as_secs(),
                    "Translation timed out, keeping original text"
                );
                text.to_string()
            }
        }
    }

    /// Translate, then overlay the agricultural glossary for `target`.
    pub async fn enhance_domain_translation(&self, text: &str, target: Language) -> String {
        let translated = self.translate(text, target, None).await;
        apply_glossary(&translated, target)
    }

    /// Welcome message for a language tag, English when unsupported.
    pub fn greeting(&self, tag: &str) -> &'static str {
        greeting_for(tag)
    }

    /// Supported languages in display order.
    pub fn supported_languages(&self) -> Vec<LanguageOption> {
        Language::ALL.into_iter().map(LanguageOption::from).collect()
    }
}

impl Default for LanguageService {
    fn default() -> Self {
        Self::passthrough()
    }
}
