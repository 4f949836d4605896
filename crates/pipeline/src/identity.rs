//! "Who built you?" detection.

/// Lowercased phrasings per language. A query containing any of them gets
/// the attribution answer.
const IDENTITY_PHRASES: [(&str, &[&str]); 9] = [
    ("en", &["who developed you?", "who created you?", "who made you?"]),
    ("hi", &["आपको किसने बनाया?", "आपका डेवलपर कौन है?", "तुम्हें किसने बनाया है?"]),
    ("es", &["¿quién te desarrolló?", "¿quién te creó?", "¿quién te hizo?"]),
    ("fr", &["qui t'a développé?", "qui t'a créé?", "qui t'a fait?"]),
    ("de", &["wer hat dich entwickelt?", "wer hat dich geschaffen?", "wer hat dich gemacht?"]),
    ("ar", &["من طورك؟", "من خلقك؟", "من صنعك؟"]),
    ("bn", &["কে তোমাকে তৈরি করেছে?", "তোমার ডেভেলপার কে?"]),
    ("ta", &["உன்னை யார் உருவாக்கினார்கள்?", "உன்னை யார் உருவாக்கியது?"]),
    ("te", &["మిమ్మల్ని ఎవరు అభివృద్ధి చేశారు?", "మిమ్మల్ని ఎవరు సృష్టించారు?"]),
];

/// Language code of the matched phrasing, if the raw query asks who built
/// the assistant.
pub fn identity_question(raw: &str) -> Option<&'static str> {
    let lowered = raw.to_lowercase();
    IDENTITY_PHRASES
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| lowered.contains(p)))
        .map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_across_languages() {
        assert_eq!(identity_question("Who developed you?"), Some("en"));
        assert_eq!(identity_question("hey, WHO MADE YOU? just curious"), Some("en"));
        assert_eq!(identity_question("आपको किसने बनाया?"), Some("hi"));
        assert_eq!(identity_question("¿Quién te creó?"), Some("es"));
        assert_eq!(identity_question("من صنعك؟"), Some("ar"));
    }

    #[test]
    fn test_requires_exact_phrasing() {
        assert_eq!(identity_question("who developed wheat varieties"), None);
        assert_eq!(identity_question("who made you"), None);
        assert_eq!(identity_question(""), None);
    }
}
