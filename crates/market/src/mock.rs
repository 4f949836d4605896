//! Fixed quote table used in mock price mode.

use chrono::NaiveDate;

use crate::quote::{PriceQuote, Trend};

struct MockRow {
    key: &'static str,
    commodity: &'static str,
    price: &'static str,
    trend: Trend,
    change: &'static str,
    min_price: &'static str,
    max_price: &'static str,
    quality: &'static str,
}

const MOCK_MARKET: &str = "Delhi";

const TABLE: [MockRow; 3] = [
    MockRow {
        key: "wheat",
        commodity: "Wheat",
        price: "₹2,150 per quintal",
        trend: Trend::Up,
        change: "+50",
        min_price: "₹2,100",
        max_price: "₹2,200",
        quality: "FAQ (Fair Average Quality)",
    },
    MockRow {
        key: "rice",
        commodity: "Rice",
        price: "₹3,200 per quintal",
        trend: Trend::Down,
        change: "-75",
        min_price: "₹3,150",
        max_price: "₹3,250",
        quality: "Grade A",
    },
    MockRow {
        key: "corn",
        commodity: "Corn/Maize",
        price: "₹1,850 per quintal",
        trend: Trend::Stable,
        change: "0",
        min_price: "₹1,800",
        max_price: "₹1,900",
        quality: "Yellow Maize",
    },
];

/// Mock quote for `commodity`, dated `today`.
///
/// Unknown commodities get the wheat row, so this never comes back empty.
pub fn mock_quote(commodity: &str, today: NaiveDate) -> PriceQuote {
    let key = commodity.trim().to_lowercase();
    let row = TABLE
        .iter()
        .find(|row| row.key == key)
        .unwrap_or(&TABLE[0]);

    PriceQuote {
        commodity: row.commodity.to_string(),
        market: MOCK_MARKET.to_string(),
        price: row.price.to_string(),
        date: today.format("%Y-%m-%d").to_string(),
        trend: row.trend,
        change: row.change.to_string(),
        min_price: row.min_price.to_string(),
        max_price: row.max_price.to_string(),
        quality: row.quality.to_string(),
    }
}
