//! Completion client crate for AgriGenius.
//!
//! Provider-agnostic access to the generative model used by the retrieval
//! engine and the translation provider.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **Together**: Hosted completions API
//!
//! # Example
//! ```no_run
//! use agrigenius_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("When is wheat sown?", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, TogetherClient};
pub use types::ProviderType;
