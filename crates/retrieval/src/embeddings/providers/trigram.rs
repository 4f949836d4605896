//! Offline embeddings from hashed word and character-trigram features.

use std::collections::HashMap;

use agrigenius_core::AppResult;

use crate::embeddings::provider::EmbeddingProvider;

const STOP_WORDS: [&str; 32] = [
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "how", "what", "when",
];

/// Deterministic, content-dependent embeddings with no model behind them.
///
/// Each kept word adds its own hashed dimension plus one per padded character
/// trigram, so "irrigate" and "irrigation" share most of their mass. Vectors
/// are unit length; blank input gives the zero vector.
#[derive(Debug, Clone)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        {
            *counts.entry(word).or_insert(0) += 1;
        }

        let mut vector = vec![0.0f32; self.dimensions];
        for (word, count) in counts {
            vector[self.bucket(word.bytes(), 31)] += count as f32;

            let padded: Vec<char> = std::iter::once(' ')
                .chain(word.chars())
                .chain(std::iter::once(' '))
                .collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                vector[self.bucket(trigram.bytes(), 37)] += (count as f32).sqrt();
            }
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }

    fn bucket(&self, bytes: impl Iterator<Item = u8>, multiplier: u64) -> usize {
        let hash = bytes.fold(0u64, |acc, b| acc.wrapping_mul(multiplier).wrapping_add(b as u64));
        (hash % self.dimensions as u64) as usize
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    // Paraphrased questions land around 0.35-0.5 against a matching
    // 200-char chunk; unrelated ones stay under 0.3.
    fn default_similarity_threshold(&self) -> f32 {
        0.3
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.vectorize(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::cosine_similarity;

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[tokio::test]
    async fn test_unit_length() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("Wheat needs loamy soil").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!((norm(&embedding) - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_deterministic_batch() {
        let provider = TrigramProvider::new(128);
        let texts = vec!["drip irrigation".to_string(), "drip irrigation".to_string()];
        let embeddings = provider.embed_batch(&texts).await.unwrap();

        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0], embeddings[1]);
    }

    #[tokio::test]
    async fn test_related_text_scores_higher() {
        let provider = TrigramProvider::new(384);
        let query = provider.embed("rice irrigation").await.unwrap();
        let close = provider.embed("Irrigation schedule for rice paddies").await.unwrap();
        let far = provider.embed("Tractor loan subsidy forms").await.unwrap();

        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[tokio::test]
    async fn test_blank_and_stop_words_give_zero_vector() {
        let provider = TrigramProvider::new(64);
        for text in ["", "the and of", "  "] {
            let embedding = provider.embed(text).await.unwrap();
            assert!(embedding.iter().all(|&x| x == 0.0));
        }
    }

    #[tokio::test]
    async fn test_non_latin_text() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("गेहूं की खेती कैसे करें").await.unwrap();
        assert!((norm(&embedding) - 1.0).abs() < 0.001);
    }
}
