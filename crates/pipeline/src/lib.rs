//! The AgriGenius query resolution pipeline.
//!
//! [`QueryPipeline::resolve`] turns a raw utterance in any supported
//! language into an [`AnswerEnvelope`], picking the first answering source
//! that has something to say. [`build_pipeline`] wires it from configuration.

pub mod bootstrap;
pub mod envelope;
pub mod identity;
pub mod pipeline;
pub mod sources;

pub use bootstrap::build_pipeline;
pub use envelope::{AnswerEnvelope, AnswerSource, Resolution};
pub use pipeline::{QueryPipeline, APOLOGY, EMPTY_QUERY_PROMPT, WORKING_LANGUAGE};
pub use sources::{KnowledgeSource, Responder};
