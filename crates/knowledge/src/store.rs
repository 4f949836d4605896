//! Structured knowledge lookup.

use std::sync::Arc;

use agrigenius_market::PriceAdvisor;

use crate::crops::{lookup_crop, mentioned_crop};
use crate::topics::lookup_topic;
use crate::types::KnowledgeEntry;
use crate::{contains_any, PRICE_KEYWORDS};

const FARMING_TERMS: [&str; 6] = ["plant", "grow", "farm", "खेती", "फसल", "किसान"];
const SEASON_TERMS: [&str; 6] = ["season", "when", "time", "मौसम", "कब", "समय"];
const SOIL_TERMS: [&str; 3] = ["soil", "मिट्टी", "भूमि"];
const WATER_TERMS: [&str; 4] = ["water", "irrigation", "पानी", "सिंचाई"];
const FERTILIZER_TERMS: [&str; 3] = ["fertilizer", "खाद", "उर्वरक"];

const FARMING_ANSWER: &str = "For successful farming: Choose the right crops for your climate, prepare soil properly, maintain proper spacing, provide adequate water and nutrients, and monitor for pests and diseases regularly.";
const SEASON_ANSWER: &str = "Planting seasons vary by crop and location. Kharif crops (rice, corn) are planted in monsoon (June-July). Rabi crops (wheat, peas) are planted in winter (November-December). Check local agricultural extension services for specific timing in your area.";
const SOIL_ANSWER: &str = "Soil health is crucial for farming. Test soil pH (should be 6-7 for most crops), add organic compost, ensure proper drainage, and avoid overuse of chemical fertilizers. Different crops need different soil types.";
const WATER_ANSWER: &str = "Water management tips: Water early morning or evening, use drip irrigation for efficiency, check soil moisture before watering, and mulch around plants to retain moisture.";
const FERTILIZER_ANSWER: &str = "Fertilizer guidance: Use organic fertilizers for long-term soil health, apply NPK (Nitrogen-Phosphorus-Potassium) based on crop needs, follow soil test recommendations, and don't over-fertilize.";

/// Crop and topic lookups plus a handful of fixed answers.
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    prices: Arc<PriceAdvisor>,
}

impl KnowledgeStore {
    pub fn new(prices: Arc<PriceAdvisor>) -> Self {
        Self { prices }
    }

    pub fn lookup_crop(&self, name: &str) -> Option<KnowledgeEntry> {
        lookup_crop(name)
    }

    pub fn lookup_topic(&self, text: &str) -> Option<KnowledgeEntry> {
        lookup_topic(text)
    }

    pub fn format(&self, entry: &KnowledgeEntry) -> String {
        entry.format()
    }

    /// Answer a working-language query, or `None` when nothing matches.
    ///
    /// Price questions go to the price advisor before any crop or topic
    /// match is tried.
    pub async fn search(&self, query: &str) -> Option<String> {
        let query = query.to_lowercase();

        if contains_any(&query, &PRICE_KEYWORDS) {
            let crop = mentioned_crop(&query);
            tracing::debug!(crop = crop.unwrap_or("none"), "Knowledge store: price query");
            return Some(self.prices.answer(crop).await);
        }

        if let Some(entry) = mentioned_crop(&query).and_then(lookup_crop) {
            tracing::debug!(crop = entry.key(), "Knowledge store: crop match");
            return Some(entry.format());
        }

        if let Some(entry) = lookup_topic(&query) {
            tracing::debug!(topic = entry.key(), "Knowledge store: topic match");
            return Some(entry.format());
        }

        let fixed = [
            (&FARMING_TERMS[..], FARMING_ANSWER),
            (&SEASON_TERMS[..], SEASON_ANSWER),
            (&SOIL_TERMS[..], SOIL_ANSWER),
            (&WATER_TERMS[..], WATER_ANSWER),
            (&FERTILIZER_TERMS[..], FERTILIZER_ANSWER),
        ];
        fixed
            .iter()
            .find(|(terms, _)| contains_any(&query, terms))
            .map(|(_, answer)| answer.to_string())
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new(Arc::new(PriceAdvisor::default()))
    }
}
