//! Farming topic tips.

use crate::types::KnowledgeEntry;

/// Topics in lookup order. Earlier topics shadow later ones.
pub static TOPICS: [(&str, [&str; 4]); 4] = [
    (
        "soil preparation",
        [
            "Test soil pH before planting",
            "Add organic compost to improve soil structure",
            "Ensure proper drainage to prevent waterlogging",
            "Till soil to appropriate depth based on crop requirements",
        ],
    ),
    (
        "fertilizer basics",
        [
            "Use organic fertilizers for long-term soil health",
            "Apply nitrogen for leaf growth, phosphorus for roots, potassium for disease resistance",
            "Follow soil test recommendations for fertilizer amounts",
            "Apply fertilizers at the right growth stages",
        ],
    ),
    (
        "pest management",
        [
            "Use integrated pest management (IPM) approach",
            "Identify pests correctly before treatment",
            "Encourage beneficial insects in your garden",
            "Rotate crops to break pest cycles",
        ],
    ),
    (
        "water management",
        [
            "Water early morning or evening to reduce evaporation",
            "Use drip irrigation or soaker hoses for efficiency",
            "Mulch around plants to retain moisture",
            "Check soil moisture before watering",
        ],
    ),
];

/// Loose topic match on free text.
///
/// A topic matches when the text contains its key or any single word of
/// its key, so "management" alone selects pest management.
pub fn lookup_topic(text: &str) -> Option<KnowledgeEntry> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    TOPICS
        .iter()
        .find(|(key, _)| text.contains(key) || key.split_whitespace().any(|w| text.contains(w)))
        .map(|(key, tips)| KnowledgeEntry::Topic {
            key: *key,
            tips: tips.as_slice(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_key_match() {
        let entry = lookup_topic("Any Fertilizer Basics?").unwrap();
        assert_eq!(entry.key(), "fertilizer basics");
    }

    #[test]
    fn test_first_match_wins() {
        // "soil" and "fertilizer" both match; soil preparation comes first.
        let entry = lookup_topic("fertilizer for poor soil").unwrap();
        assert_eq!(entry.key(), "soil preparation");

        let entry = lookup_topic("water management").unwrap();
        assert_eq!(entry.key(), "pest management");
    }

    #[test]
    fn test_no_match() {
        assert!(lookup_topic("weather tomorrow").is_none());
        assert!(lookup_topic("   ").is_none());
    }

    #[test]
    fn test_topic_rendering() {
        let text = lookup_topic("pest").unwrap().format();
        assert!(text.starts_with("Here are some tips for pest management:\n1. Use integrated"));
        assert!(text.ends_with("4. Rotate crops to break pest cycles"));
    }
}
