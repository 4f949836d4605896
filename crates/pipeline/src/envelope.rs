//! What the pipeline hands back to its caller.

use agrigenius_language::Language;
use serde::Serialize;

/// The answer as the transport serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEnvelope {
    pub answer: String,
    pub detected_language: Language,
}

/// Which stage produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Identity,
    EmptyQuery,
    Retrieval,
    KnowledgeStore,
    Rules,
    Fault,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::EmptyQuery => "empty_query",
            Self::Retrieval => "retrieval",
            Self::KnowledgeStore => "knowledge_store",
            Self::Rules => "rules",
            Self::Fault => "fault",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An envelope plus where it came from. Only the envelope leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub envelope: AnswerEnvelope,
    pub source: AnswerSource,
}

impl Resolution {
    pub fn new(answer: impl Into<String>, detected_language: Language, source: AnswerSource) -> Self {
        Self {
            envelope: AnswerEnvelope {
                answer: answer.into(),
                detected_language,
            },
            source,
        }
    }

    pub fn answer(&self) -> &str {
        &self.envelope.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_shape() {
        let resolution = Resolution::new("Namaste", Language::Hindi, AnswerSource::Rules);
        let json = serde_json::to_value(&resolution.envelope).unwrap();

        assert_eq!(json, serde_json::json!({"answer": "Namaste", "detectedLanguage": "hi"}));
    }

    #[test]
    fn test_source_names() {
        assert_eq!(AnswerSource::KnowledgeStore.to_string(), "knowledge_store");
        assert_eq!(AnswerSource::EmptyQuery.as_str(), "empty_query");
    }
}
