//! Language service for AgriGenius.
//!
//! Detects the language of an utterance, translates between supported
//! languages through a pluggable [`Translator`], and overlays an agricultural
//! glossary on translated answers.

pub mod detect;
pub mod glossary;
pub mod greetings;
pub mod service;
pub mod translate;
pub mod types;

pub use detect::detect_language;
pub use service::LanguageService;
pub use translate::{LlmTranslator, PassthroughTranslator, Translator};
pub use types::{Language, LanguageOption};
