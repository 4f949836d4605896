//! Supported language set.

use serde::{Deserialize, Serialize};

/// A language the assistant can detect, translate to, and greet in.
///
/// Declaration order is the order shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
    Arabic,
    Portuguese,
    Russian,
    Italian,
    Korean,
    Thai,
    Vietnamese,
    Bengali,
    Tamil,
    Telugu,
    Marathi,
    Gujarati,
    Kannada,
    Malayalam,
    Punjabi,
    Urdu,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 23] = [
        Language::English,
        Language::Hindi,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Japanese,
        Language::Arabic,
        Language::Portuguese,
        Language::Russian,
        Language::Italian,
        Language::Korean,
        Language::Thai,
        Language::Vietnamese,
        Language::Bengali,
        Language::Tamil,
        Language::Telugu,
        Language::Marathi,
        Language::Gujarati,
        Language::Kannada,
        Language::Malayalam,
        Language::Punjabi,
        Language::Urdu,
    ];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Chinese => "zh",
            Self::Japanese => "ja",
            Self::Arabic => "ar",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
            Self::Italian => "it",
            Self::Korean => "ko",
            Self::Thai => "th",
            Self::Vietnamese => "vi",
            Self::Bengali => "bn",
            Self::Tamil => "ta",
            Self::Telugu => "te",
            Self::Marathi => "mr",
            Self::Gujarati => "gu",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Punjabi => "pa",
            Self::Urdu => "ur",
        }
    }

    /// English display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Arabic => "Arabic",
            Self::Portuguese => "Portuguese",
            Self::Russian => "Russian",
            Self::Italian => "Italian",
            Self::Korean => "Korean",
            Self::Thai => "Thai",
            Self::Vietnamese => "Vietnamese",
            Self::Bengali => "Bengali",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Punjabi",
            Self::Urdu => "Urdu",
        }
    }

    /// Parse a language code. Region suffixes (`pt-BR`, `zh_CN`) are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    /// Parse a code, falling back to English for anything unsupported.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported language: {}", code)))
    }
}

/// `{code, name}` pair as exposed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
}

impl From<Language> for LanguageOption {
    fn from(lang: Language) -> Self {
        Self {
            code: lang.code(),
            name: lang.display_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_order() {
        let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes.len(), 23);
        assert_eq!(&codes[..6], &["en", "hi", "es", "fr", "de", "zh"]);
        assert_eq!(codes.last(), Some(&"ur"));
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("hi"), Some(Language::Hindi));
        assert_eq!(Language::from_code("PT-br"), Some(Language::Portuguese));
        assert_eq!(Language::from_code("sw"), None);
        assert_eq!(Language::from_code_or_default("sw"), Language::English);
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Language::Tamil).unwrap();
        assert_eq!(json, "\"ta\"");
        let parsed: Language = serde_json::from_str("\"mr\"").unwrap();
        assert_eq!(parsed, Language::Marathi);
    }
}
