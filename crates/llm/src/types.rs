//! Provider identification.

/// Completion provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Ollama,
    Together,
    /// No completion provider: generative features are disabled
    Disabled,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "together" | "togetherai" => Some(Self::Together),
            "none" | "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Together => "together",
            Self::Disabled => "none",
        }
    }

    /// Whether this provider needs an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Together)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("Together"), Some(ProviderType::Together));
        assert_eq!(ProviderType::parse("none"), Some(ProviderType::Disabled));
        assert_eq!(ProviderType::parse("unknown"), None);
    }

    #[test]
    fn test_requires_api_key() {
        assert!(ProviderType::Together.requires_api_key());
        assert!(!ProviderType::Ollama.requires_api_key());
    }
}
