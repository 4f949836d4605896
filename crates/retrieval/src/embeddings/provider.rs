//! Embedding provider trait and factory.

use std::sync::Arc;
use std::time::Duration;

use agrigenius_core::config::RetrievalSettings;
use agrigenius_core::{AppError, AppResult};

use super::providers::ollama::OllamaEmbeddingProvider;
use super::providers::trigram::TrigramProvider;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram", "ollama")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Cosine score separating related from unrelated text for this
    /// provider's vectors. Used when no threshold is configured.
    fn default_similarity_threshold(&self) -> f32 {
        0.6
    }

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Retrieval("No embedding returned".to_string()))
    }
}

/// Create an embedding provider from the retrieval settings.
pub fn create_provider(settings: &RetrievalSettings) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match settings.embedding_provider.as_str() {
        "trigram" => Ok(Arc::new(TrigramProvider::new(settings.embedding_dimensions))),

        "ollama" => Ok(Arc::new(
            OllamaEmbeddingProvider::new(&settings.embedding_model, settings.embedding_dimensions)
                .with_timeout(Duration::from_secs(settings.answer_timeout_secs.max(1))),
        )),

        other => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: trigram, ollama",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trigram_provider() {
        let provider = create_provider(&RetrievalSettings::default()).unwrap();
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_ollama_provider() {
        let settings = RetrievalSettings {
            embedding_provider: "ollama".to_string(),
            embedding_dimensions: 768,
            ..RetrievalSettings::default()
        };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "nomic-embed-text");
        assert_eq!(provider.dimensions(), 768);
    }

    #[test]
    fn test_create_unknown_provider() {
        let settings = RetrievalSettings {
            embedding_provider: "minilm".to_string(),
            ..RetrievalSettings::default()
        };
        let err = create_provider(&settings).unwrap_err();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let provider = create_provider(&RetrievalSettings::default()).unwrap();
        let embedding = provider.embed("wheat sowing").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
