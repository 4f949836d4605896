//! Retrieval-augmented answering over ingested agricultural documents.
//!
//! Startup flow: [`collect_blobs`] gathers web and PDF text, then
//! [`RetrievalEngine::build`] chunks, embeds and indexes it. The pipeline
//! only sees the [`AnswerEngine`] trait.

pub mod chunker;
pub mod embeddings;
pub mod engine;
pub mod index;
pub mod ingest;

pub use chunker::{build_corpus, chunk_text, Chunk};
pub use embeddings::{create_provider, EmbeddingProvider, OllamaEmbeddingProvider, TrigramProvider};
pub use engine::{AnswerEngine, RetrievalEngine, UNKNOWN_ANSWER};
pub use index::{cosine_similarity, MemoryIndex, VectorIndex};
pub use ingest::{collect_blobs, PdfExtractor, SourceBlob, WebFetcher};
