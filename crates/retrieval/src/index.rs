//! Vector index over corpus chunks.

use std::cmp::Ordering;

use agrigenius_core::{AppError, AppResult};

use crate::chunker::Chunk;

/// Trait for vector index backends.
///
/// Filled once at startup, then only searched.
pub trait VectorIndex: Send + Sync {
    /// Add a chunk with its embedding.
    fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()>;

    /// The `top_k` most similar chunks, ordered by descending score.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(Chunk, f32)>>;

    /// Number of indexed chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Brute-force in-memory index. The corpus is capped small enough that a
/// linear scan beats any real structure.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    dimensions: usize,
    entries: Vec<(Chunk, Vec<f32>)>,
}

impl MemoryIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl VectorIndex for MemoryIndex {
    fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) -> AppResult<()> {
        if embedding.len() != self.dimensions {
            return Err(AppError::Retrieval(format!(
                "Embedding for {}#{} has {} dimensions, index expects {}",
                chunk.source_id,
                chunk.position,
                embedding.len(),
                self.dimensions
            )));
        }
        self.entries.push((chunk, embedding));
        Ok(())
    }

    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(Chunk, f32)>> {
        if query_embedding.len() != self.dimensions {
            return Err(AppError::Retrieval(format!(
                "Query embedding has {} dimensions, index expects {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(&Chunk, f32)> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| (chunk, cosine_similarity(query_embedding, embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(chunk, score)| (chunk.clone(), score))
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cosine similarity in [-1, 1]; zero when either vector is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(position: u32) -> Chunk {
        Chunk {
            source_id: "doc".to_string(),
            position,
            text: format!("chunk {}", position),
        }
    }

    fn index() -> MemoryIndex {
        let mut index = MemoryIndex::new(2);
        index.insert(chunk(0), vec![1.0, 0.0]).unwrap();
        index.insert(chunk(1), vec![0.0, 1.0]).unwrap();
        index.insert(chunk(2), vec![0.7, 0.7]).unwrap();
        index
    }

    #[test]
    fn test_search_orders_by_descending_score() {
        let results = index().search(&[1.0, 0.1], 3).unwrap();

        let positions: Vec<u32> = results.iter().map(|(c, _)| c.position).collect();
        assert_eq!(positions, vec![0, 2, 1]);
        assert!(results[0].1 >= results[1].1 && results[1].1 >= results[2].1);
    }

    #[test]
    fn test_search_respects_top_k() {
        assert_eq!(index().search(&[0.0, 1.0], 1).unwrap().len(), 1);
        assert!(MemoryIndex::new(2).search(&[0.0, 1.0], 4).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = index();
        assert!(index.insert(chunk(3), vec![1.0]).is_err());
        assert!(index.search(&[1.0, 0.0, 0.0], 2).is_err());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
