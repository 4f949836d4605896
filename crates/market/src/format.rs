//! Chat-ready price texts.

use std::fmt::Write;

use crate::quote::PriceQuote;

const GOVERNMENT_SITES: [&str; 4] = [
    "eNAM (National Agriculture Market): enam.gov.in",
    "Agmarknet: agmarknet.gov.in",
    "Ministry of Agriculture: agricoop.gov.in",
    "National Sample Survey Office: mospi.gov.in",
];

const MOBILE_APPS: [&str; 4] = [
    "eNAM App - Official government app",
    "Kisan Suvidha App - Weather, market prices, advisories",
    "AgriApp - Market prices and farming tips",
    "Crop Insurance App - Prices and insurance info",
];

const EXCHANGES: [&str; 3] = [
    "MCX (Multi Commodity Exchange)",
    "NCDEX (National Commodity & Derivatives Exchange)",
    "Local commodity exchanges",
];

const QUICK_TIPS: [&str; 4] = [
    "Prices vary by location, quality, and season",
    "Check multiple sources for best rates",
    "Consider local mandi prices vs online rates",
    "Factor in transportation costs",
];

/// Render a quote as the multi-line price report.
pub fn format_quote_response(quote: &PriceQuote) -> String {
    format!(
        "💰 **Current Market Price for {}:**\n\n\
         🏪 **Market:** {}\n\
         💵 **Current Price:** {}\n\
         📅 **Date:** {}\n\
         📊 **Trend:** {} {}\n\
         🔻 **Min Price:** {}\n\
         🔺 **Max Price:** {}\n\
         ⭐ **Quality:** {}\n\n\
         📝 **Note:** Prices are indicative and may vary by location and quality.\n\
         For local rates, check your nearest mandi or agricultural market.\n\n\
         Need help with farming this crop? Just ask! 🌾",
        quote.commodity,
        quote.market,
        quote.price,
        quote.date,
        quote.trend.glyph(),
        quote.change,
        quote.min_price,
        quote.max_price,
        quote.quality,
    )
}

/// Static guidance on where to find prices, optionally naming a crop.
pub fn format_no_quote_guidance(mentioned: Option<&str>) -> String {
    let crop = mentioned.map(str::trim).filter(|c| !c.is_empty());

    let mut out = String::new();
    match crop {
        Some(crop) => {
            let _ = write!(out, "💰 **Current Market Prices for {}:**\n\n", capitalize(crop));
        }
        None => out.push_str("💰 **Current Market Prices:**\n\n"),
    }
    out.push_str(
        "I don't have access to real-time market prices as they change daily. \
         Here are the best sources for current prices:\n\n",
    );

    push_section(&mut out, "🏪 **Government Resources:**\n", &GOVERNMENT_SITES);
    push_section(&mut out, "\n📱 **Mobile Apps:**\n", &MOBILE_APPS);
    push_section(&mut out, "\n📈 **Commodity Exchanges:**\n", &EXCHANGES);
    push_section(&mut out, "\n💡 **Quick Tips:**\n", &QUICK_TIPS);

    if let Some(crop) = crop {
        let _ = write!(
            out,
            "\nWould you like farming advice for {} instead?",
            crop.to_lowercase()
        );
    }
    out
}

fn push_section(out: &mut String, heading: &str, items: &[&str]) {
    out.push_str(heading);
    for item in items {
        out.push_str("• ");
        out.push_str(item);
        out.push('\n');
    }
}

/// Uppercase the first character, lowercase the rest.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
