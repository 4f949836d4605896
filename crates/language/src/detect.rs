//! Offline language detection.
//!
//! Text is first classified by Unicode script. Scripts shared by several
//! supported languages are split with small marker lists: Devanagari into
//! Hindi and Marathi, Arabic into Arabic and Urdu, Han into Chinese and
//! Japanese. Latin text is scored against stop-word profiles.
//!
//! Detection never fails: short, ambiguous or unsupported input yields
//! [`Language::English`].

use std::collections::HashMap;

use crate::types::Language;

/// Fewer classified letters than this and we do not guess.
const MIN_LETTERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Script {
    Latin,
    Cyrillic,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Thai,
    Arabic,
    Hangul,
    Kana,
    Han,
}

fn classify(c: char) -> Option<Script> {
    let script = match c {
        'a'..='z' | 'A'..='Z' => Script::Latin,
        '\u{00C0}'..='\u{024F}' if c.is_alphabetic() => Script::Latin,
        '\u{1E00}'..='\u{1EFF}' => Script::Latin,
        '\u{0400}'..='\u{04FF}' => Script::Cyrillic,
        '\u{0900}'..='\u{097F}' => Script::Devanagari,
        '\u{0980}'..='\u{09FF}' => Script::Bengali,
        '\u{0A00}'..='\u{0A7F}' => Script::Gurmukhi,
        '\u{0A80}'..='\u{0AFF}' => Script::Gujarati,
        '\u{0B80}'..='\u{0BFF}' => Script::Tamil,
        '\u{0C00}'..='\u{0C7F}' => Script::Telugu,
        '\u{0C80}'..='\u{0CFF}' => Script::Kannada,
        '\u{0D00}'..='\u{0D7F}' => Script::Malayalam,
        '\u{0E00}'..='\u{0E7F}' => Script::Thai,
        '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' => Script::Arabic,
        '\u{FB50}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFF}' => Script::Arabic,
        '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' => {
            Script::Hangul
        }
        '\u{3040}'..='\u{30FF}' => Script::Kana,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => Script::Han,
        _ => return None,
    };
    Some(script)
}

/// Letters used by Urdu but not by Arabic.
const URDU_LETTERS: &[char] = &[
    'ٹ', 'ڈ', 'ڑ', 'ں', 'ے', 'ہ', 'ھ', 'گ', 'پ', 'چ', 'ک', 'ی',
];

const MARATHI_MARKERS: &[&str] = &[
    "आहे", "आहेत", "आणि", "मी", "नाही", "काय", "कसे", "कशी", "करावी", "करावे", "ची", "चा",
    "चे", "मध्ये", "शेती", "कोणती",
];

const HINDI_MARKERS: &[&str] = &[
    "है", "हैं", "और", "का", "की", "के", "में", "नहीं", "क्या", "कैसे", "करें", "मैं", "खेती",
    "कौन",
];

const ENGLISH_WORDS: &[&str] = &[
    "the", "is", "are", "what", "how", "when", "which", "to", "of", "and", "in", "for", "my",
    "do", "does", "can", "should", "with", "on", "it", "this", "who", "you", "best",
];
const SPANISH_WORDS: &[&str] = &[
    "el", "la", "los", "las", "de", "que", "y", "en", "es", "cómo", "qué", "cuándo", "cuál",
    "para", "por", "mi", "una", "con", "del", "se", "son", "está", "quién",
];
const FRENCH_WORDS: &[&str] = &[
    "le", "la", "les", "des", "est", "et", "du", "une", "pour", "comment", "quand", "quel",
    "quelle", "dans", "je", "mon", "avec", "sur", "pas", "ce", "qui", "au",
];
const GERMAN_WORDS: &[&str] = &[
    "der", "die", "das", "und", "ist", "wie", "wann", "was", "ich", "mein", "meinem", "nicht",
    "mit", "für", "ein", "eine", "zu", "von", "den", "dem", "im", "auf", "wer",
];
const PORTUGUESE_WORDS: &[&str] = &[
    "o", "os", "de", "que", "e", "é", "como", "quando", "para", "com", "um", "uma", "não", "do",
    "da", "em", "no", "na", "meu", "minha", "qual",
];
const ITALIAN_WORDS: &[&str] = &[
    "il", "lo", "gli", "di", "che", "e", "è", "come", "quando", "per", "con", "un", "una", "non",
    "del", "della", "nel", "mio", "sono", "qual", "chi",
];

/// Evidence a non-English Latin guess needs. A lone shared function word
/// ("per", "no") is too weak to override the default.
const MIN_FOREIGN_SCORE: usize = 2;

/// Characters that only Vietnamese uses among the Latin-script languages.
const VIETNAMESE_CHARS: &str = "ơưđăạảấầẩẫậắằẳẵặẹẻẽếềểễệỉịọỏốồổỗộớờởỡợụủứừửữựỳỵỷỹ";

/// Detect the language of `text`.
pub fn detect_language(text: &str) -> Language {
    let mut counts: HashMap<Script, usize> = HashMap::new();
    for script in text.chars().filter_map(classify) {
        *counts.entry(script).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    if total < MIN_LETTERS {
        return Language::default();
    }

    // Kana anywhere means Han characters belong to Japanese.
    if let Some(kana) = counts.remove(&Script::Kana) {
        let han = counts.remove(&Script::Han).unwrap_or(0);
        counts.insert(Script::Kana, kana + han);
    }

    let Some(script) = dominant(&counts) else {
        return Language::default();
    };

    let detected = match script {
        Script::Latin => detect_latin(text),
        Script::Cyrillic => Language::Russian,
        Script::Devanagari => detect_devanagari(text),
        Script::Bengali => Language::Bengali,
        Script::Gurmukhi => Language::Punjabi,
        Script::Gujarati => Language::Gujarati,
        Script::Tamil => Language::Tamil,
        Script::Telugu => Language::Telugu,
        Script::Kannada => Language::Kannada,
        Script::Malayalam => Language::Malayalam,
        Script::Thai => Language::Thai,
        Script::Arabic => {
            if text.chars().any(|c| URDU_LETTERS.contains(&c)) {
                Language::Urdu
            } else {
                Language::Arabic
            }
        }
        Script::Hangul => Language::Korean,
        Script::Kana => Language::Japanese,
        Script::Han => Language::Chinese,
    };

    tracing::trace!(language = %detected, ?script, "Detected language");
    detected
}

/// The script with the strictly highest count, if any.
fn dominant(counts: &HashMap<Script, usize>) -> Option<Script> {
    let best = counts.values().copied().max()?;
    let mut winners = counts.iter().filter(|&(_, &n)| n == best);
    let (script, _) = winners.next()?;
    if winners.next().is_some() {
        return None;
    }
    Some(*script)
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| {
                c.is_ascii_punctuation() || matches!(c, '¿' | '¡' | '।' | '؟' | '«' | '»')
            })
            .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn score(words: &[String], profile: &[&str]) -> usize {
    words
        .iter()
        .filter(|w| profile.contains(&w.as_str()))
        .count()
}

fn detect_devanagari(text: &str) -> Language {
    let words = words(text);
    if score(&words, MARATHI_MARKERS) > score(&words, HINDI_MARKERS) {
        Language::Marathi
    } else {
        Language::Hindi
    }
}

fn detect_latin(text: &str) -> Language {
    let lowered = text.to_lowercase();
    let words = words(&lowered);

    let vietnamese = lowered
        .chars()
        .filter(|c| VIETNAMESE_CHARS.contains(*c))
        .count();

    let has = |chars: &str| lowered.chars().any(|c| chars.contains(c));
    let mut scores = [
        (Language::English, score(&words, ENGLISH_WORDS)),
        (
            Language::Spanish,
            score(&words, SPANISH_WORDS) + usize::from(has("ñ¿¡")),
        ),
        (
            Language::French,
            score(&words, FRENCH_WORDS) + usize::from(has("çœ")),
        ),
        (
            Language::German,
            score(&words, GERMAN_WORDS) + usize::from(has("ßäöü")),
        ),
        (
            Language::Portuguese,
            score(&words, PORTUGUESE_WORDS) + usize::from(has("ãõ")),
        ),
        (Language::Italian, score(&words, ITALIAN_WORDS)),
        (Language::Vietnamese, vietnamese * 2),
    ];
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    match scores {
        [(_, 0), ..] => Language::default(),
        [(_, first), (_, second), ..] if first == second => Language::default(),
        [(lang, first), ..] if lang != Language::English && first < MIN_FOREIGN_SCORE => {
            Language::default()
        }
        [(lang, _), ..] => lang,
    }
}
