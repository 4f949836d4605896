//! Error types for AgriGenius.
//!
//! A single enum covers every failure category a collaborator can report.
//! Most of these are recovered locally by the answering chain; only
//! configuration and startup errors ever reach the process boundary.

use thiserror::Error;

/// Unified error type for AgriGenius.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Completion provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Translation provider errors
    #[error("Translation error: {0}")]
    Translation(String),

    /// Retrieval engine errors (embedding, index, answering)
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Document ingestion errors (web fetch, PDF extraction)
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Price-data errors
    #[error("Market error: {0}")]
    Market(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A bounded call exceeded its deadline
    #[error("Timed out after {0}s: {1}")]
    Timeout(u64, String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = AppError::Timeout(10, "translation".to_string());
        assert_eq!(err.to_string(), "Timed out after 10s: translation");
    }

    #[test]
    fn test_from_json_error() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
