//! Corpus chunking with configurable size and overlap.

use agrigenius_core::config::RetrievalSettings;
use serde::Serialize;

use crate::ingest::SourceBlob;

/// One indexed passage of an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Where the passage came from (URL or file path)
    pub source_id: String,
    /// Zero-based position within its source
    pub position: u32,
    pub text: String,
}

/// Split text into character windows of `chunk_size` that overlap by `overlap`.
///
/// Window bounds count characters, not bytes, so multi-byte scripts are never
/// cut mid-codepoint. Whitespace-only windows are dropped.
pub fn chunk_text(source_id: &str, text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    if text.trim().is_empty() || chunk_size == 0 {
        return vec![];
    }

    // Byte offset of every char start, plus the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let step = if chunk_size > overlap {
        chunk_size - overlap
    } else {
        chunk_size
    };

    let mut chunks = Vec::new();
    let mut position = 0u32;
    let mut start = 0;

    while start < char_count {
        let end = (start + chunk_size).min(char_count);
        let window = text[bounds[start]..bounds[end]].trim();

        if !window.is_empty() {
            chunks.push(Chunk {
                source_id: source_id.to_string(),
                position,
                text: window.to_string(),
            });
            position += 1;
        }

        if end == char_count {
            break;
        }
        start += step;
    }

    tracing::debug!(
        source = source_id,
        chunks = chunks.len(),
        chunk_size,
        overlap,
        "Chunked document"
    );

    chunks
}

/// Chunk every blob in order, keeping at most `max_chunks_per_document` per
/// blob and `max_chunks_total` overall.
pub fn build_corpus(blobs: &[SourceBlob], settings: &RetrievalSettings) -> Vec<Chunk> {
    let mut corpus = Vec::new();

    for blob in blobs {
        let remaining = settings.max_chunks_total.saturating_sub(corpus.len());
        if remaining == 0 {
            break;
        }
        let take = settings.max_chunks_per_document.min(remaining);
        corpus.extend(
            chunk_text(
                &blob.source_id,
                &blob.text,
                settings.chunk_size,
                settings.chunk_overlap,
            )
            .into_iter()
            .take(take),
        );
    }

    tracing::info!(chunks = corpus.len(), documents = blobs.len(), "Built retrieval corpus");
    corpus
}
