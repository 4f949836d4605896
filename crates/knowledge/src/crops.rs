//! Crop fact table.

use crate::types::{CropFacts, KnowledgeEntry};

/// Crops in lookup order. Mention extraction returns the first match.
pub static CROPS: [(&str, CropFacts); 4] = [
    (
        "wheat",
        CropFacts {
            planting_season: "Rabi season (November-December)",
            harvest_time: "4-6 months after planting",
            soil_type: "Well-drained loamy soil with pH 6-7",
            watering: "Requires 4-6 irrigations during growth period",
        },
    ),
    (
        "rice",
        CropFacts {
            planting_season: "Kharif season (June-July)",
            harvest_time: "3-6 months after planting",
            soil_type: "Clay or clay loam soil with good water retention",
            watering: "Requires continuous standing water in early stages",
        },
    ),
    (
        "corn",
        CropFacts {
            planting_season: "Kharif season (June-July)",
            harvest_time: "3-4 months after planting",
            soil_type: "Well-drained fertile soil with pH 6-6.8",
            watering: "Deep watering 1-2 times per week",
        },
    ),
    (
        "tomato",
        CropFacts {
            planting_season: "Year-round with proper care",
            harvest_time: "2-3 months after transplanting",
            soil_type: "Well-drained organic-rich soil with pH 6-6.8",
            watering: "Regular watering, avoid overwatering",
        },
    ),
];

/// Exact lookup by crop name after trimming and lowercasing.
pub fn lookup_crop(name: &str) -> Option<KnowledgeEntry> {
    let key = name.trim().to_lowercase();
    CROPS
        .iter()
        .find(|(crop, _)| *crop == key)
        .map(|(key, facts)| KnowledgeEntry::Crop { key: *key, facts })
}

/// First crop key appearing anywhere in already-lowercased `text`.
pub fn mentioned_crop(text: &str) -> Option<&'static str> {
    CROPS
        .iter()
        .map(|(key, _)| *key)
        .find(|key| text.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact_after_normalizing() {
        assert!(lookup_crop("  Wheat ").is_some());
        assert!(lookup_crop("TOMATO").is_some());
        assert!(lookup_crop("tomatoes").is_none());
        assert!(lookup_crop("whe").is_none());
    }

    #[test]
    fn test_mentioned_crop_takes_table_order() {
        assert_eq!(mentioned_crop("rice or wheat?"), Some("wheat"));
        assert_eq!(mentioned_crop("growing tomatoes"), Some("tomato"));
        assert_eq!(mentioned_crop("millet"), None);
    }
}
