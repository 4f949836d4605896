//! Knowledge table entries.

/// Growing facts for one crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropFacts {
    pub planting_season: &'static str,
    pub harvest_time: &'static str,
    pub soil_type: &'static str,
    pub watering: &'static str,
}

/// A read-only entry of the knowledge tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeEntry {
    Crop {
        key: &'static str,
        facts: &'static CropFacts,
    },
    Topic {
        key: &'static str,
        tips: &'static [&'static str],
    },
}

impl KnowledgeEntry {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Crop { key, .. } | Self::Topic { key, .. } => key,
        }
    }

    /// Render the entry as chat text.
    ///
    /// Crops render as labeled bullets, topics as a numbered tip list.
    pub fn format(&self) -> String {
        match self {
            Self::Crop { key, facts } => format!(
                "For {}:\n• Planting: {}\n• Harvest: {}\n• Soil: {}\n• Water: {}",
                capitalize(key),
                facts.planting_season,
                facts.harvest_time,
                facts.soil_type,
                facts.watering
            ),
            Self::Topic { key, tips } => {
                let mut out = format!("Here are some tips for {}:", key);
                for (i, tip) in tips.iter().enumerate() {
                    out.push_str(&format!("\n{}. {}", i + 1, tip));
                }
                out
            }
        }
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
