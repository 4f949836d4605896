//! Rule-based responder.
//!
//! A keyword ladder tried top to bottom; the first matching rung answers.
//! Rung order is part of the contract: a query naming both a crop and a soil
//! keyword gets the crop guide.

use std::sync::Arc;

use agrigenius_market::PriceAdvisor;

use crate::contains_any;
use crate::types::capitalize;

const PRICE_KEYWORDS: [&str; 13] = [
    "price", "cost", "rate", "market", "sell", "buy", "mandi", "wholesale", "retail", "मूल्य",
    "कीमत", "दर", "बाज़ार",
];
const SOIL_KEYWORDS: [&str; 4] = ["soil", "ph", "fertility", "ground"];
const FERTILIZER_KEYWORDS: [&str; 4] = ["fertilizer", "fertiliser", "nutrient", "feed"];
const PEST_KEYWORDS: [&str; 5] = ["pest", "insect", "bug", "disease", "control"];
const WEATHER_KEYWORDS: [&str; 5] = ["weather", "climate", "temperature", "rain", "water"];
const IRRIGATION_KEYWORDS: [&str; 3] = ["water", "irrigation", "watering"];
const SEASON_KEYWORDS: [&str; 5] = ["when", "time", "season", "plant", "harvest"];
const GENERAL_KEYWORDS: [&str; 4] = ["farm", "agriculture", "grow", "cultivation"];

const CROP_GUIDES: [(&str, &str); 4] = [
    ("wheat", "Wheat grows best in well-drained loamy soil with pH 6.0-7.5. Plant in fall/winter, needs 12-15 inches of water annually. Harvest when grain moisture is 13-14%."),
    ("rice", "Rice requires flooded fields or high moisture. Plant in warm weather (75-85°F). Needs 40-70 inches of water. Harvest when grains are golden and firm."),
    ("corn", "Corn needs warm weather (60-95°F), well-drained soil with pH 6.0-6.8. Plant after soil reaches 50°F. Requires 20-30 inches of water during growing season."),
    ("tomato", "Tomatoes need warm weather (65-85°F), well-drained soil with pH 6.0-6.8. Start indoors 6-8 weeks before last frost. Need consistent watering and support structures."),
];

const SOIL_PH: &str = "🌍 **Soil pH Information:**\nSoil pH affects nutrient availability. Most crops prefer pH 6.0-7.0. Test annually and adjust with lime (raise pH) or sulfur (lower pH).\n\nWould you like to know about testing soil pH or adjusting it for specific crops?";
const SOIL_FERTILITY: &str = "🌍 **Soil Fertility Guide:**\nGood soil needs organic matter, proper drainage, and balanced nutrients (NPK). Add compost, rotate crops, and test soil every 2-3 years.\n\nWant to learn about specific nutrients or composting?";
const SOIL_PREPARATION: &str = "🌍 **Soil Preparation:**\nPrepare soil by tilling 8-12 inches deep, removing weeds, adding organic matter, and ensuring proper drainage before planting.\n\nNeed help with specific soil problems or crop-specific soil requirements?";

const FERTILIZER_ORGANIC: &str = "🌿 **Organic Fertilizers:**\nOrganic fertilizers include compost, manure, bone meal, and fish emulsion. They release nutrients slowly and improve soil structure.\n\nInterested in making your own compost or learning about specific organic fertilizers?";
const FERTILIZER_SYNTHETIC: &str = "⚗️ **Synthetic Fertilizers:**\nSynthetic fertilizers provide quick nutrients. Common ratios: 10-10-10 (balanced), 20-10-10 (high nitrogen for leafy growth).\n\nNeed help calculating fertilizer amounts or understanding NPK ratios for your crops?";
const FERTILIZER_TIMING: &str = "🌱 **Fertilizer Timing:**\nApply fertilizer based on soil tests and crop needs. Generally: pre-plant, side-dress during growth, and avoid over-fertilizing.\n\nWhat specific crops are you fertilizing? I can provide more targeted advice!";

const PEST_ORGANIC: &str = "🐛 **Organic Pest Control:**\nOrganic pest control includes beneficial insects, neem oil, diatomaceous earth, crop rotation, and companion planting.\n\nWhat specific pests are you dealing with? I can suggest targeted organic solutions!";
const PEST_PREVENTION: &str = "🛡️ **Pest Prevention:**\nPrevent pests through healthy soil, proper spacing, crop rotation, sanitation, and encouraging beneficial insects.\n\nWhat crops are you growing? Prevention strategies vary by crop type!";
const PEST_IPM: &str = "🔬 **Integrated Pest Management:**\nIntegrated Pest Management combines biological, cultural, physical, and chemical controls. Monitor regularly, identify pests correctly, and use least toxic methods first.\n\nAre you dealing with a specific pest problem? Describe the symptoms and affected crops!";

const WEATHER: &str = "🌤️ **Weather & Agriculture:**\nWeather greatly affects farming success. Monitor temperature, rainfall, and seasonal patterns. Most crops need consistent water but avoid waterlogging. Use weather forecasts for planting and harvesting decisions.\n\nWhat's your local climate like? I can suggest suitable crops!";
const IRRIGATION: &str = "💧 **Irrigation Guide:**\nProper watering is crucial! Deep, less frequent watering is usually better than shallow, frequent watering. Consider drip irrigation for efficiency. Water early morning or evening to reduce evaporation.\n\nWhat crops are you watering? Each has different water needs!";
const SEASONAL: &str = "📅 **Farming Calendar:**\nTiming depends on your location and crop choice. Generally:\n• **Spring:** Plant warm-season crops after last frost\n• **Summer:** Maintain crops, harvest early varieties\n• **Fall:** Plant cool-season crops, harvest summer crops\n• **Winter:** Plan next year, maintain equipment\n\nWhat's your location and which crops interest you?";
const GENERAL: &str = "🚜 **General Farming Tips:**\nSuccessful farming involves: good soil preparation, choosing right crops for your climate, proper timing, regular monitoring, and continuous learning.\n\n**Key Success Factors:**\n• Know your soil and climate\n• Choose appropriate varieties\n• Practice crop rotation\n• Monitor for pests/diseases\n• Keep detailed records\n\nWhat specific aspect of farming would you like to explore?";

/// Shown when nothing else matches.
pub const ONBOARDING: &str = "🌾 **Welcome to AgriGenius!** 🌾

I'm here to help with all your farming questions! I can assist with:

🌱 **Crops:** Wheat, Rice, Corn, Tomatoes, and more
🌍 **Soil:** pH testing, fertility, preparation
🌿 **Fertilizers:** Organic and synthetic options
🐛 **Pest Control:** Natural and chemical solutions
💧 **Irrigation:** Water management techniques
📅 **Timing:** When to plant and harvest

**Try asking me:**
• \"How do I grow tomatoes?\"
• \"What's the best soil pH for wheat?\"
• \"How to control pests organically?\"
• \"When should I plant corn?\"

What farming challenge can I help you solve today? 🚜";

/// Keyword-to-template dispatcher. Always produces an answer.
#[derive(Debug, Clone)]
pub struct RuleResponder {
    prices: Arc<PriceAdvisor>,
}

impl RuleResponder {
    pub fn new(prices: Arc<PriceAdvisor>) -> Self {
        Self { prices }
    }

    /// Answer a working-language query.
    ///
    /// Price questions go to the shared [`PriceAdvisor`], so with no quote
    /// available this rung answers with the advisor's "where to find prices"
    /// guidance, the same text the knowledge store gives.
    pub async fn respond(&self, query: &str) -> String {
        let query = query.to_lowercase();

        if contains_any(&query, &PRICE_KEYWORDS) {
            let crop = CROP_GUIDES
                .iter()
                .map(|(crop, _)| *crop)
                .find(|crop| query.contains(crop));
            tracing::debug!(crop = crop.unwrap_or("none"), "Responder: price rung");
            return self.prices.answer(crop).await;
        }

        if let Some((crop, guide)) = CROP_GUIDES.iter().find(|(crop, _)| query.contains(crop)) {
            return format!(
                "🌱 **{} Farming Guide:**\n{}\n\nWould you like to know more about {} diseases, fertilizers, or harvesting techniques?",
                capitalize(crop),
                guide,
                crop
            );
        }

        let answer = if contains_any(&query, &SOIL_KEYWORDS) {
            if query.contains("ph") {
                SOIL_PH
            } else if contains_any(&query, &["fertile", "fertility", "nutrient"]) {
                SOIL_FERTILITY
            } else {
                SOIL_PREPARATION
            }
        } else if contains_any(&query, &FERTILIZER_KEYWORDS) {
            if query.contains("organic") {
                FERTILIZER_ORGANIC
            } else if contains_any(&query, &["synthetic", "chemical", "npk"]) {
                FERTILIZER_SYNTHETIC
            } else {
                FERTILIZER_TIMING
            }
        } else if contains_any(&query, &PEST_KEYWORDS) {
            if query.contains("organic") {
                PEST_ORGANIC
            } else if query.contains("prevent") {
                PEST_PREVENTION
            } else {
                PEST_IPM
            }
        } else if contains_any(&query, &WEATHER_KEYWORDS) {
            WEATHER
        } else if contains_any(&query, &IRRIGATION_KEYWORDS) {
            IRRIGATION
        } else if contains_any(&query, &SEASON_KEYWORDS) {
            SEASONAL
        } else if contains_any(&query, &GENERAL_KEYWORDS) {
            GENERAL
        } else {
            ONBOARDING
        };
        answer.to_string()
    }
}

impl Default for RuleResponder {
    fn default() -> Self {
        Self::new(Arc::new(PriceAdvisor::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn respond(query: &str) -> String {
        RuleResponder::default().respond(query).await
    }

    #[tokio::test]
    async fn test_price_rung_is_first() {
        let answer = respond("rice price in mandi").await;
        assert!(answer.starts_with("💰 **Current Market Price for Rice:**"));
        assert!(answer.contains("📉 -75"));
    }

    #[tokio::test]
    async fn test_crop_beats_soil() {
        let answer = respond("best soil for corn").await;
        assert!(answer.starts_with("🌱 **Corn Farming Guide:**\nCorn needs warm weather"));
        assert!(answer.ends_with("more about corn diseases, fertilizers, or harvesting techniques?"));
    }

    #[tokio::test]
    async fn test_soil_sub_dispatch() {
        assert_eq!(respond("ideal ph level").await, SOIL_PH);
        assert_eq!(respond("improve soil fertility").await, SOIL_FERTILITY);
        assert_eq!(respond("prepare the ground").await, SOIL_PREPARATION);
    }

    #[tokio::test]
    async fn test_fertilizer_sub_dispatch() {
        assert_eq!(respond("organic fertilizer").await, FERTILIZER_ORGANIC);
        assert_eq!(respond("chemical fertiliser").await, FERTILIZER_SYNTHETIC);
        assert_eq!(respond("fertilizer schedule").await, FERTILIZER_TIMING);
    }

    #[tokio::test]
    async fn test_pest_sub_dispatch() {
        assert_eq!(respond("organic insect spray").await, PEST_ORGANIC);
        assert_eq!(respond("prevent bugs").await, PEST_PREVENTION);
        assert_eq!(respond("pest outbreak").await, PEST_IPM);
    }

    #[tokio::test]
    async fn test_weather_shadows_irrigation() {
        assert_eq!(respond("watering schedule").await, WEATHER);
        assert_eq!(respond("drip irrigation").await, IRRIGATION);
    }

    #[tokio::test]
    async fn test_later_rungs() {
        assert_eq!(respond("when to sow").await, SEASONAL);
        assert_eq!(respond("cultivation advice").await, GENERAL);
        assert_eq!(respond("hello").await, ONBOARDING);
        assert_eq!(respond("").await, ONBOARDING);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let first = respond("how to grow tomato").await;
        let second = respond("how to grow tomato").await;
        assert_eq!(first, second);
        assert!(first.starts_with("🌱 **Tomato Farming Guide:**"));
    }

    #[tokio::test]
    async fn test_price_rung_without_quotes_gives_guidance() {
        let responder = RuleResponder::new(Arc::new(PriceAdvisor::unavailable()));
        let answer = responder.respond("wheat price today").await;
        assert_eq!(
            answer,
            agrigenius_market::format_no_quote_guidance(Some("wheat"))
        );
    }
}
