//! Completion provider implementations.

mod ollama;
mod together;

pub use ollama::OllamaClient;
pub use together::TogetherClient;
