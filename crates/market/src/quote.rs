//! Price quote model.

use serde::{Deserialize, Serialize};

/// Direction of the latest price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Parse a trend label. Anything unrecognized is `Stable`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Stable,
        }
    }

    /// Trend from a signed change.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Stable
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Up => "📈",
            Self::Down => "📉",
            Self::Stable => "➡️",
        }
    }
}

/// A single commodity quote, produced fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub commodity: String,
    pub market: String,
    pub price: String,
    /// `%Y-%m-%d` when known
    pub date: String,
    pub trend: Trend,
    pub change: String,
    pub min_price: String,
    pub max_price: String,
    pub quality: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_parse_is_closed() {
        assert_eq!(Trend::parse("up"), Trend::Up);
        assert_eq!(Trend::parse(" DOWN "), Trend::Down);
        assert_eq!(Trend::parse("stable"), Trend::Stable);
        assert_eq!(Trend::parse("sideways"), Trend::Stable);
        assert_eq!(Trend::parse(""), Trend::Stable);
    }

    #[test]
    fn test_trend_from_change() {
        assert_eq!(Trend::from_change(12.5), Trend::Up);
        assert_eq!(Trend::from_change(-0.5), Trend::Down);
        assert_eq!(Trend::from_change(0.0), Trend::Stable);
    }
}
