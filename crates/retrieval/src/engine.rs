//! Retrieval-augmented answering.
//!
//! Similarity search over the corpus picks context passages, then a
//! completion model answers from them. Built once at startup and only read
//! afterwards, so one engine serves every request through an `Arc`.

use std::sync::Arc;

use agrigenius_core::config::RetrievalSettings;
use agrigenius_core::{AppError, AppResult};
use agrigenius_llm::{LlmClient, LlmRequest};

use crate::chunker::{build_corpus, Chunk};
use crate::embeddings::EmbeddingProvider;
use crate::index::{MemoryIndex, VectorIndex};
use crate::ingest::SourceBlob;

/// Answer given when nothing in the corpus is close enough to the question.
pub const UNKNOWN_ANSWER: &str = "Don't know.";

const DEFAULT_MAX_TOKENS: u32 = 512;
const DEFAULT_TEMPERATURE: f32 = 0.1;
const SAMPLING_TOP_K: u32 = 1;

/// What the query pipeline needs from an answering engine.
#[async_trait::async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Fixed at construction; never re-probed per request.
    fn is_available(&self) -> bool;

    async fn answer(&self, query: &str) -> AppResult<String>;
}

pub struct RetrievalEngine {
    index: MemoryIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Option<Arc<dyn LlmClient>>,
    top_k: usize,
    similarity_threshold: f32,
    max_tokens: u32,
    temperature: f32,
}

impl std::fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("chunks", &self.index.len())
            .field("embedder", &self.embedder.provider_name())
            .field("llm", &self.llm.as_ref().map(|llm| llm.provider_name().to_string()))
            .field("top_k", &self.top_k)
            .field("similarity_threshold", &self.similarity_threshold)
            .finish()
    }
}

impl RetrievalEngine {
    /// Chunk and embed `blobs` into a fresh index.
    ///
    /// An empty corpus or a missing completion client still yields an engine,
    /// one that reports itself unavailable.
    pub async fn build(
        settings: &RetrievalSettings,
        blobs: &[SourceBlob],
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Option<Arc<dyn LlmClient>>,
    ) -> AppResult<Self> {
        let corpus = build_corpus(blobs, settings);
        let mut index = MemoryIndex::new(embedder.dimensions());

        if !corpus.is_empty() {
            let texts: Vec<String> = corpus.iter().map(|chunk| chunk.text.clone()).collect();
            let embeddings = embedder.embed_batch(&texts).await?;
            if embeddings.len() != corpus.len() {
                return Err(AppError::Retrieval(format!(
                    "Embedder returned {} vectors for {} chunks",
                    embeddings.len(),
                    corpus.len()
                )));
            }
            for (chunk, embedding) in corpus.into_iter().zip(embeddings) {
                index.insert(chunk, embedding)?;
            }
        }

        let similarity_threshold = settings
            .similarity_threshold
            .unwrap_or_else(|| embedder.default_similarity_threshold());
        let engine = Self {
            index,
            embedder,
            llm,
            top_k: settings.top_k.max(1),
            similarity_threshold,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        };
        tracing::info!(
            chunks = engine.index.len(),
            embedder = engine.embedder.provider_name(),
            available = engine.is_available(),
            threshold = engine.similarity_threshold,
            "Retrieval engine built"
        );
        Ok(engine)
    }

    /// Override the completion budget and sampling temperature.
    pub fn with_generation(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    /// Chunks scoring at or above the similarity threshold, best first.
    pub async fn retrieve(&self, query: &str) -> AppResult<Vec<(Chunk, f32)>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.index.search(&query_embedding, self.top_k)?;
        let before = results.len();

        let relevant: Vec<_> = results
            .into_iter()
            .filter(|(_, score)| *score >= self.similarity_threshold)
            .collect();
        tracing::debug!(
            retrieved = before,
            relevant = relevant.len(),
            threshold = self.similarity_threshold,
            "Similarity search"
        );
        Ok(relevant)
    }
}

#[async_trait::async_trait]
impl AnswerEngine for RetrievalEngine {
    fn is_available(&self) -> bool {
        self.llm.is_some() && !self.index.is_empty()
    }

    async fn answer(&self, query: &str) -> AppResult<String> {
        let Some(llm) = self.llm.as_ref().filter(|_| !self.index.is_empty()) else {
            return Err(AppError::Retrieval(
                "Retrieval engine is not available".to_string(),
            ));
        };

        let relevant = self.retrieve(query).await?;
        if relevant.is_empty() {
            tracing::info!(
                threshold = self.similarity_threshold,
                "No chunk above threshold, answering unknown"
            );
            return Ok(UNKNOWN_ANSWER.to_string());
        }

        let chunks: Vec<&Chunk> = relevant.iter().map(|(chunk, _)| chunk).collect();
        let request = LlmRequest::new(build_prompt(&build_context(&chunks), query), llm.default_model())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_top_k(SAMPLING_TOP_K);

        let response = llm.complete(&request).await?;
        let answer = response.content.trim();
        if answer.is_empty() {
            return Err(AppError::Retrieval("Model returned an empty answer".to_string()));
        }
        Ok(answer.to_string())
    }
}

/// Passages joined in rank order.
fn build_context(chunks: &[&Chunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "[INST]  Your name is AgriGenius, Please answer questions related to Agriculture. \
         Try explaining in simple words. Answer in less than 100 words. \
         If you don't know the answer, simply respond with 'Don't know.'\n \
         CONTEXT: {}\n \
         QUESTION: {} [/INST]",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{create_provider, TrigramProvider};
    use agrigenius_llm::{LlmResponse, LlmUsage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLlm {
        calls: AtomicUsize,
        last: Mutex<Option<LlmRequest>>,
        reply: String,
    }

    impl RecordingLlm {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                ..Self::default()
            })
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for RecordingLlm {
        fn provider_name(&self) -> &str {
            "recording"
        }

        fn default_model(&self) -> &str {
            "test-model"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            Ok(LlmResponse {
                content: self.reply.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            })
        }
    }

    fn settings(threshold: f32) -> RetrievalSettings {
        RetrievalSettings {
            chunk_size: 60,
            chunk_overlap: 0,
            similarity_threshold: Some(threshold),
            ..RetrievalSettings::default()
        }
    }

    fn blobs() -> Vec<SourceBlob> {
        vec![SourceBlob {
            source_id: "farmerbook.pdf".to_string(),
            text: "Paddy irrigation needs standing water in the field. \
                   Tractor subsidies are available under state schemes."
                .to_string(),
        }]
    }

    async fn engine(threshold: f32, llm: Option<Arc<dyn LlmClient>>) -> RetrievalEngine {
        RetrievalEngine::build(
            &settings(threshold),
            &blobs(),
            Arc::new(TrigramProvider::new(384)),
            llm,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_answers_from_context() {
        let llm = RecordingLlm::replying("  Keep water standing in the paddy.  ");
        let engine = engine(0.1, Some(llm.clone())).await;
        assert!(engine.is_available());

        let answer = engine.answer("paddy irrigation water").await.unwrap();
        assert_eq!(answer, "Keep water standing in the paddy.");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);

        let request = llm.last.lock().unwrap().clone().unwrap();
        assert!(request.prompt.starts_with("[INST]  Your name is AgriGenius"));
        assert!(request.prompt.contains("CONTEXT: Paddy irrigation needs standing water"));
        assert!(request.prompt.ends_with("QUESTION: paddy irrigation water [/INST]"));
        assert_eq!(request.model, "test-model");
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.top_k, Some(1));
    }

    #[tokio::test]
    async fn test_nothing_relevant_skips_model() {
        let llm = RecordingLlm::replying("should not be used");
        let engine = engine(0.99, Some(llm.clone())).await;

        let answer = engine.answer("banana export prices").await.unwrap();
        assert_eq!(answer, UNKNOWN_ANSWER);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_corpus_is_unavailable() {
        let llm: Arc<dyn LlmClient> = RecordingLlm::replying("x");
        let engine = RetrievalEngine::build(
            &settings(0.1),
            &[],
            Arc::new(TrigramProvider::new(384)),
            Some(llm),
        )
        .await
        .unwrap();

        assert!(!engine.is_available());
        assert_eq!(engine.chunk_count(), 0);
        assert!(engine.answer("wheat").await.is_err());
    }

    #[tokio::test]
    async fn test_no_model_is_unavailable() {
        let engine = engine(0.1, None).await;
        assert!(engine.chunk_count() > 0);
        assert!(!engine.is_available());
        assert!(engine.answer("paddy").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_model_reply_is_error() {
        let engine = engine(0.1, Some(RecordingLlm::replying("   "))).await;
        assert!(engine.answer("paddy irrigation").await.is_err());
    }

    #[tokio::test]
    async fn test_default_settings_answer_paraphrased_questions() {
        let blob = SourceBlob {
            source_id: "crops.html".to_string(),
            text: "Wheat is a rabi crop sown in November after the monsoon retreats. \
                   Wheat needs four to six irrigations, the first at crown root initiation \
                   about 21 days after sowing. Rice is a kharif crop transplanted in June \
                   and July into puddled fields with standing water. Rice needs nitrogen \
                   applied in three splits."
                .to_string(),
        };
        let settings = RetrievalSettings::default();
        let llm = RecordingLlm::replying("Wheat is sown in November.");
        let engine = RetrievalEngine::build(
            &settings,
            &[blob],
            create_provider(&settings).unwrap(),
            Some(llm.clone()),
        )
        .await
        .unwrap();

        for question in [
            "When is wheat sown?",
            "how many irrigations does wheat need",
            "When is rice transplanted?",
        ] {
            let answer = engine.answer(question).await.unwrap();
            assert_eq!(answer, "Wheat is sown in November.", "question: {}", question);
        }
        assert_eq!(llm.calls.load(Ordering::SeqCst), 3);

        let answer = engine.answer("What is the capital of France?").await.unwrap();
        assert_eq!(answer, UNKNOWN_ANSWER);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_configured_threshold_overrides_provider_default() {
        let llm = RecordingLlm::replying("unused");
        let engine = engine(0.99, Some(llm.clone())).await;
        assert_eq!(engine.similarity_threshold, 0.99);

        let default = RetrievalEngine::build(
            &RetrievalSettings::default(),
            &blobs(),
            Arc::new(TrigramProvider::new(384)),
            None,
        )
        .await
        .unwrap();
        assert_eq!(default.similarity_threshold, 0.3);
    }

    #[tokio::test]
    async fn test_generation_override() {
        let llm = RecordingLlm::replying("ok");
        let engine = engine(0.1, Some(llm.clone())).await.with_generation(64, 0.5);
        engine.answer("tractor subsidies").await.unwrap();

        let request = llm.last.lock().unwrap().clone().unwrap();
        assert_eq!(request.max_tokens, Some(64));
        assert_eq!(request.temperature, Some(0.5));
    }
}
