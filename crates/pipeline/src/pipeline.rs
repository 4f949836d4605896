//! The query resolution pipeline.
//!
//! One pass per request: detect, identity shortcut, normalize, empty guard,
//! source selection, localize. Requests share nothing mutable, so a single
//! pipeline behind an `Arc` serves them all concurrently.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use agrigenius_core::Capabilities;
use agrigenius_language::{detect_language, Language, LanguageService};
use agrigenius_retrieval::AnswerEngine;
use futures::FutureExt;
use tracing::Instrument;

use crate::envelope::{AnswerSource, Resolution};
use crate::identity::identity_question;
use crate::sources::{KnowledgeSource, Responder};

/// Language the knowledge sources work in.
pub const WORKING_LANGUAGE: Language = Language::English;

pub const EMPTY_QUERY_PROMPT: &str = "Please enter a question.";

pub const APOLOGY: &str = "I apologize, but I'm experiencing technical difficulties. Please try asking your agriculture question again, or consult with local farming experts for immediate assistance.";

pub const DEFAULT_ATTRIBUTION: &str = "I was developed by Jayesh Bhandarkar.";

pub struct QueryPipeline {
    language: Arc<LanguageService>,
    knowledge: Arc<dyn KnowledgeSource>,
    responder: Arc<dyn Responder>,
    engine: Option<Arc<dyn AnswerEngine>>,
    capabilities: Capabilities,
    attribution: String,
    answer_timeout: Duration,
}

impl QueryPipeline {
    /// Assemble a pipeline.
    ///
    /// Engine availability is read once here. An engine that is unavailable,
    /// or that `capabilities` does not enable, is never consulted.
    pub fn new(
        language: Arc<LanguageService>,
        knowledge: Arc<dyn KnowledgeSource>,
        responder: Arc<dyn Responder>,
        engine: Option<Arc<dyn AnswerEngine>>,
        capabilities: Capabilities,
    ) -> Self {
        let available = engine.as_ref().is_some_and(|engine| engine.is_available());
        let capabilities = capabilities.with_retrieval_available(available);
        let engine = engine.filter(|_| capabilities.retrieval);

        Self {
            language,
            knowledge,
            responder,
            engine,
            capabilities,
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            answer_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Deadline for one retrieval-engine answer.
    pub fn with_answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = timeout;
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn language(&self) -> &LanguageService {
        &self.language
    }

    /// Resolve one raw utterance into an answer.
    ///
    /// Never fails: a panic anywhere inside becomes the apology, in the
    /// language of the request where that can still be told. `hint` is the
    /// caller's UI language, used only when the query has no text to detect.
    pub async fn resolve(&self, raw: &str, hint: Option<&str>) -> Resolution {
        let span = tracing::info_span!(
            "resolve",
            language = tracing::field::Empty,
            source = tracing::field::Empty
        );

        let outcome = AssertUnwindSafe(self.run(raw, hint))
            .catch_unwind()
            .instrument(span.clone())
            .await;

        match outcome {
            Ok(resolution) => resolution,
            Err(panic) => {
                let message = panic_message(panic.as_ref()).to_string();
                self.fault(raw, &message).instrument(span).await
            }
        }
    }

    async fn run(&self, raw: &str, hint: Option<&str>) -> Resolution {
        let raw = raw.trim();
        let detected = if raw.is_empty() {
            hint.and_then(Language::from_code).unwrap_or_default()
        } else {
            self.language.detect(raw)
        };
        let span = tracing::Span::current();
        span.record("language", detected.code());

        if let Some(phrasing) = identity_question(raw) {
            tracing::debug!(phrasing, "Identity question");
            span.record("source", AnswerSource::Identity.as_str());
            let answer = self.localize_fixed(&self.attribution, detected).await;
            return Resolution::new(answer, detected, AnswerSource::Identity);
        }

        let query = if detected == WORKING_LANGUAGE {
            raw.to_string()
        } else {
            self.language
                .translate(raw, WORKING_LANGUAGE, Some(detected))
                .await
        };
        let query = query.trim();

        if query.is_empty() {
            span.record("source", AnswerSource::EmptyQuery.as_str());
            let answer = self.localize_fixed(EMPTY_QUERY_PROMPT, detected).await;
            return Resolution::new(answer, detected, AnswerSource::EmptyQuery);
        }

        let (answer, source) = self.select_source(query).await;
        span.record("source", source.as_str());

        let answer = if detected == WORKING_LANGUAGE {
            answer
        } else {
            self.language
                .enhance_domain_translation(&answer, detected)
                .await
        };

        tracing::info!(source = %source, "Query resolved");
        Resolution::new(answer, detected, source)
    }

    /// First source with an answer wins. The engine, when present, shadows
    /// both table sources unless it fails or times out.
    async fn select_source(&self, query: &str) -> (String, AnswerSource) {
        if let Some(engine) = &self.engine {
            match tokio::time::timeout(self.answer_timeout, engine.answer(query)).await {
                Ok(Ok(answer)) => return (answer, AnswerSource::Retrieval),
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Retrieval engine failed, using fallback sources");
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = self.answer_timeout.as_secs(),
                        "Retrieval engine timed out, using fallback sources"
                    );
                }
            }
        }

        if let Some(answer) = self.knowledge.search(query).await {
            return (answer, AnswerSource::KnowledgeStore);
        }

        (self.responder.respond(query).await, AnswerSource::Rules)
    }

    /// Fixed English text, translated (without the glossary) when needed.
    async fn localize_fixed(&self, text: &str, target: Language) -> String {
        if target == WORKING_LANGUAGE {
            return text.to_string();
        }
        self.language
            .translate(text, target, Some(WORKING_LANGUAGE))
            .await
    }

    async fn fault(&self, raw: &str, panic: &str) -> Resolution {
        tracing::error!(
            panic,
            query_len = raw.len(),
            "Query pipeline fault"
        );

        let detected = std::panic::catch_unwind(|| detect_language(raw)).unwrap_or_default();
        let answer = AssertUnwindSafe(self.localize_fixed(APOLOGY, detected))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| APOLOGY.to_string());
        Resolution::new(answer, detected, AnswerSource::Fault)
    }
}

fn panic_message<'a>(panic: &'a (dyn Any + Send + 'static)) -> &'a str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
