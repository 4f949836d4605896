//! Agricultural glossary overlay.
//!
//! Applied after generic translation. Replacement is plain substring
//! substitution in table order, so a term inside a longer word is replaced
//! too ("plant" in "plantation").

use crate::types::Language;

/// Source terms, in replacement order.
pub const TERMS: [&str; 10] = [
    "crop",
    "farming",
    "agriculture",
    "soil",
    "fertilizer",
    "irrigation",
    "harvest",
    "pesticide",
    "seed",
    "plant",
];

const HINDI: [&str; 10] = [
    "फसल",
    "खेती",
    "कृषि",
    "मिट्टी",
    "उर्वरक",
    "सिंचाई",
    "फसल काटना",
    "कीटनाशक",
    "बीज",
    "पौधा",
];

const SPANISH: [&str; 10] = [
    "cultivo",
    "agricultura",
    "agricultura",
    "suelo",
    "fertilizante",
    "riego",
    "cosecha",
    "pesticida",
    "semilla",
    "planta",
];

/// Localized terms for `target`, aligned with [`TERMS`].
pub fn terms_for(target: Language) -> Option<&'static [&'static str; 10]> {
    match target {
        Language::English => Some(&TERMS),
        Language::Hindi => Some(&HINDI),
        Language::Spanish => Some(&SPANISH),
        _ => None,
    }
}

/// Replace every glossary term in `text` with its localized form.
pub fn apply_glossary(text: &str, target: Language) -> String {
    let Some(localized) = terms_for(target) else {
        return text.to_string();
    };

    TERMS
        .iter()
        .zip(localized.iter())
        .fold(text.to_string(), |acc, (term, local)| acc.replace(term, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_overlay() {
        let out = apply_glossary("Test the soil before you plant the seed.", Language::Spanish);
        assert_eq!(out, "Test the suelo before you planta the semilla.");
    }

    #[test]
    fn test_hindi_overlay() {
        let out = apply_glossary("irrigation", Language::Hindi);
        assert_eq!(out, "सिंचाई");
    }

    #[test]
    fn test_substring_collisions_are_replaced() {
        assert_eq!(
            apply_glossary("plantation", Language::Spanish),
            "plantaation"
        );
    }

    #[test]
    fn test_english_and_unsupported_targets_are_unchanged() {
        let text = "Use fertilizer on the crop.";
        assert_eq!(apply_glossary(text, Language::English), text);
        assert_eq!(apply_glossary(text, Language::French), text);
    }
}
