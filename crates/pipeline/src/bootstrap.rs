//! Startup wiring: configuration in, ready pipeline out.
//!
//! Every optional collaborator is built here exactly once. A collaborator
//! that fails to come up is logged and left out, and the resulting
//! capabilities are fixed for the life of the process.

use std::sync::Arc;
use std::time::Duration;

use agrigenius_core::{AppConfig, AppResult, Capabilities};
use agrigenius_knowledge::{KnowledgeStore, RuleResponder};
use agrigenius_language::{LanguageService, LlmTranslator};
use agrigenius_llm::{create_client, LlmClient};
use agrigenius_market::PriceAdvisor;
use agrigenius_retrieval::{collect_blobs, create_provider, AnswerEngine, RetrievalEngine};

use crate::pipeline::QueryPipeline;

/// Build the pipeline and all of its collaborators from configuration.
///
/// # Errors
/// Only an invalid configuration is an error. Missing credentials, an
/// unreachable corpus or a failed embedder degrade to the fallback sources.
pub async fn build_pipeline(config: &AppConfig) -> AppResult<QueryPipeline> {
    config.validate()?;
    let declared = config.capabilities();

    let llm = match create_client(&config.llm, config.resolve_api_key().as_deref()) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(
                provider = %config.llm.provider,
                error = %e,
                "Completion client unavailable, generative features off"
            );
            None
        }
    };

    let language = build_language_service(config, declared, llm.clone());
    let prices = Arc::new(PriceAdvisor::from_settings(&config.market));
    let knowledge = Arc::new(KnowledgeStore::new(prices.clone()));
    let responder = Arc::new(RuleResponder::new(prices.clone()));

    let engine = match llm.clone() {
        Some(client) if declared.retrieval => build_engine(config, client).await,
        _ => None,
    };

    let capabilities = Capabilities {
        translation: declared.translation && llm.is_some(),
        live_prices: declared.live_prices && prices.has_live_feeds(),
        ..declared
    };
    let pipeline = QueryPipeline::new(
        Arc::new(language),
        knowledge,
        responder,
        engine,
        capabilities,
    )
    .with_attribution(&config.assistant.attribution)
    .with_answer_timeout(Duration::from_secs(config.retrieval.answer_timeout_secs.max(1)));

    let capabilities = pipeline.capabilities();
    tracing::info!(
        mode = capabilities.mode(),
        retrieval = capabilities.retrieval,
        translation = capabilities.translation,
        live_prices = capabilities.live_prices,
        "AgriGenius ready"
    );
    Ok(pipeline)
}

fn build_language_service(
    config: &AppConfig,
    declared: Capabilities,
    llm: Option<Arc<dyn LlmClient>>,
) -> LanguageService {
    if !declared.translation {
        return LanguageService::passthrough();
    }
    match llm {
        Some(client) => LanguageService::new(
            Arc::new(LlmTranslator::new(client)),
            Duration::from_secs(config.translation.timeout_secs.max(1)),
        ),
        None => {
            tracing::warn!("Translation enabled but no completion client; answers stay in English");
            LanguageService::passthrough()
        }
    }
}

async fn build_engine(
    config: &AppConfig,
    llm: Arc<dyn LlmClient>,
) -> Option<Arc<dyn AnswerEngine>> {
    let settings = &config.retrieval;
    let embedder = match create_provider(settings) {
        Ok(embedder) => embedder,
        Err(e) => {
            tracing::warn!(error = %e, "Embedding provider unavailable, retrieval off");
            return None;
        }
    };

    let blobs = collect_blobs(config).await;
    match RetrievalEngine::build(settings, &blobs, embedder, Some(llm)).await {
        Ok(engine) => Some(Arc::new(
            engine.with_generation(config.llm.max_tokens, config.llm.temperature),
        )),
        Err(e) => {
            tracing::warn!(error = %e, "Retrieval engine failed to build, retrieval off");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::AnswerSource;

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key_env = "AGRIGENIUS_TEST_UNSET_KEY".to_string();
        config.retrieval.urls = vec![];
        config.retrieval.pdf_files = vec![];
        config
    }

    #[tokio::test]
    async fn test_provider_none_runs_in_fallback_mode() {
        let mut config = offline_config();
        config.llm.provider = "none".to_string();

        let pipeline = build_pipeline(&config).await.unwrap();
        let capabilities = pipeline.capabilities();
        assert!(!capabilities.retrieval);
        assert!(!capabilities.translation);
        assert_eq!(capabilities.mode(), "fallback");
        assert_eq!(pipeline.language().translator_name(), "passthrough");

        let resolution = pipeline.resolve("how to grow tomato", None).await;
        assert_eq!(resolution.source, AnswerSource::KnowledgeStore);
    }

    #[tokio::test]
    async fn test_missing_together_key_degrades() {
        let mut config = offline_config();
        config.llm.provider = "together".to_string();

        let pipeline = build_pipeline(&config).await.unwrap();
        assert_eq!(pipeline.capabilities().mode(), "fallback");
        assert!(!pipeline.capabilities().translation);
    }

    #[tokio::test]
    async fn test_empty_corpus_leaves_retrieval_off() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = offline_config();
        config.workspace = dir.path().to_path_buf();

        let pipeline = build_pipeline(&config).await.unwrap();
        assert!(!pipeline.capabilities().retrieval);
        assert!(pipeline.capabilities().translation);
    }

    #[tokio::test]
    async fn test_custom_attribution() {
        let mut config = offline_config();
        config.llm.provider = "none".to_string();
        config.assistant.attribution = "Made by the extension office.".to_string();

        let pipeline = build_pipeline(&config).await.unwrap();
        let resolution = pipeline.resolve("who made you?", None).await;
        assert_eq!(resolution.answer(), "Made by the extension office.");
    }

    #[tokio::test]
    async fn test_live_prices_without_feed_keys_is_off() {
        let mut config = offline_config();
        config.llm.provider = "none".to_string();
        config.market.use_mock = false;
        config.market.agmarknet_key_env = "AGRIGENIUS_TEST_UNSET_AGMARKNET".to_string();
        config.market.commodity_key_env = "AGRIGENIUS_TEST_UNSET_COMMODITY".to_string();
        assert!(config.capabilities().live_prices);

        let pipeline = build_pipeline(&config).await.unwrap();
        assert!(!pipeline.capabilities().live_prices);

        let resolution = pipeline.resolve("price of wheat", None).await;
        assert!(!resolution.answer().contains("₹2,150"));
    }

    #[tokio::test]
    async fn test_invalid_config_is_error() {
        let mut config = offline_config();
        config.retrieval.chunk_overlap = config.retrieval.chunk_size;
        assert!(build_pipeline(&config).await.is_err());
    }
}
