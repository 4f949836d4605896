//! Price advisor: quote lookup with designed fallbacks.

use std::sync::Arc;
use std::time::Duration;

use agrigenius_core::config::{read_secret, MarketSettings};
use chrono::Local;

use crate::format::{format_no_quote_guidance, format_quote_response};
use crate::live::{AgmarknetFeed, CommodityApiFeed, PriceFeed};
use crate::mock::mock_quote;
use crate::quote::PriceQuote;

/// Commodity used when a price question names no crop.
pub const DEFAULT_COMMODITY: &str = "wheat";

/// Where quotes come from.
#[derive(Clone)]
pub enum PriceMode {
    /// The fixed mock table
    Mock,
    /// Live feeds, tried in order
    Live(Vec<Arc<dyn PriceFeed>>),
    /// No price data at all; every answer is guidance
    Unavailable,
}

impl std::fmt::Debug for PriceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mock => f.write_str("Mock"),
            Self::Live(feeds) => f
                .debug_list()
                .entries(feeds.iter().map(|feed| feed.name()))
                .finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Answers price questions.
#[derive(Debug, Clone)]
pub struct PriceAdvisor {
    mode: PriceMode,
    default_market: String,
}

impl PriceAdvisor {
    pub fn new(mode: PriceMode, default_market: impl Into<String>) -> Self {
        Self {
            mode,
            default_market: default_market.into(),
        }
    }

    pub fn mock() -> Self {
        Self::new(PriceMode::Mock, "Delhi")
    }

    pub fn unavailable() -> Self {
        Self::new(PriceMode::Unavailable, "Delhi")
    }

    /// Build from settings. Live feeds are only created when their API key is
    /// set; live mode with no key at all is [`PriceMode::Unavailable`].
    pub fn from_settings(settings: &MarketSettings) -> Self {
        if settings.use_mock {
            return Self::new(PriceMode::Mock, &settings.default_market);
        }

        let timeout = Duration::from_secs(settings.timeout_secs.max(1));
        let mut feeds: Vec<Arc<dyn PriceFeed>> = Vec::new();
        if let Some(key) = read_secret(&settings.agmarknet_key_env) {
            feeds.push(Arc::new(AgmarknetFeed::new(
                &settings.agmarknet_endpoint,
                key,
                timeout,
            )));
        }
        if let Some(key) = read_secret(&settings.commodity_key_env) {
            feeds.push(Arc::new(CommodityApiFeed::new(
                &settings.commodity_endpoint,
                key,
                timeout,
            )));
        }

        if feeds.is_empty() {
            tracing::warn!(
                agmarknet = %settings.agmarknet_key_env,
                commodity = %settings.commodity_key_env,
                "Live prices requested but no feed API key is set"
            );
            return Self::new(PriceMode::Unavailable, &settings.default_market);
        }
        Self::new(PriceMode::Live(feeds), &settings.default_market)
    }

    /// True when at least one live feed can be queried.
    pub fn has_live_feeds(&self) -> bool {
        matches!(&self.mode, PriceMode::Live(feeds) if !feeds.is_empty())
    }

    pub fn mode(&self) -> &PriceMode {
        &self.mode
    }

    pub fn default_market(&self) -> &str {
        &self.default_market
    }

    /// Look up a quote.
    ///
    /// With `use_mock` the fixed table answers and this is never `None`.
    /// Otherwise the live feeds are tried in order; `None` means all failed.
    pub async fn get_quote(
        &self,
        commodity: &str,
        market: &str,
        use_mock: bool,
    ) -> Option<PriceQuote> {
        if use_mock {
            return Some(mock_quote(commodity, Local::now().date_naive()));
        }

        let PriceMode::Live(ref feeds) = self.mode else {
            return None;
        };

        for feed in feeds {
            match feed.fetch(commodity, market).await {
                Ok(quote) => {
                    tracing::debug!(feed = feed.name(), commodity, "Live quote fetched");
                    return Some(quote);
                }
                Err(e) => {
                    tracing::warn!(feed = feed.name(), commodity, error = %e, "Price feed failed");
                }
            }
        }
        None
    }

    /// Full price answer for an optional crop mention.
    ///
    /// A quote renders as the price report; no quote renders as guidance.
    pub async fn answer(&self, crop: Option<&str>) -> String {
        let use_mock = match self.mode {
            PriceMode::Mock => true,
            PriceMode::Live(_) => false,
            PriceMode::Unavailable => return format_no_quote_guidance(crop),
        };

        let commodity = crop.unwrap_or(DEFAULT_COMMODITY);
        match self.get_quote(commodity, &self.default_market, use_mock).await {
            Some(quote) => format_quote_response(&quote),
            None => format_no_quote_guidance(crop),
        }
    }
}

impl Default for PriceAdvisor {
    fn default() -> Self {
        Self::mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::Trend;
    use agrigenius_core::{AppError, AppResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFeed {
        name: &'static str,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FixedFeed {
        fn new(name: &'static str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl PriceFeed for FixedFeed {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, commodity: &str, market: &str) -> AppResult<PriceQuote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Market("down".to_string()));
            }
            Ok(PriceQuote {
                commodity: commodity.to_string(),
                market: market.to_string(),
                price: self.name.to_string(),
                date: "2024-03-15".to_string(),
                trend: Trend::Up,
                change: "+1".to_string(),
                min_price: "N/A".to_string(),
                max_price: "N/A".to_string(),
                quality: "N/A".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_mock_never_absent() {
        let advisor = PriceAdvisor::unavailable();
        let quote = advisor.get_quote("mango", "Pune", true).await.unwrap();
        assert_eq!(quote.commodity, "Wheat");
    }

    #[tokio::test]
    async fn test_mock_answer_for_wheat() {
        let answer = PriceAdvisor::mock().answer(None).await;
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(answer.contains("₹2,150 per quintal"));
        assert!(answer.contains(&format!("📅 **Date:** {}", today)));
        assert!(answer.contains("📈 +50"));
    }

    #[tokio::test]
    async fn test_live_falls_back_to_secondary() {
        let primary = FixedFeed::new("primary", true);
        let secondary = FixedFeed::new("secondary", false);
        let feeds: Vec<Arc<dyn PriceFeed>> = vec![primary.clone(), secondary.clone()];
        let advisor = PriceAdvisor::new(PriceMode::Live(feeds), "Delhi");

        let quote = advisor.get_quote("rice", "Delhi", false).await.unwrap();
        assert_eq!(quote.price, "secondary");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_live_all_failing_gives_guidance() {
        let feeds: Vec<Arc<dyn PriceFeed>> = vec![FixedFeed::new("a", true), FixedFeed::new("b", true)];
        let advisor = PriceAdvisor::new(PriceMode::Live(feeds), "Delhi");

        assert!(advisor.get_quote("rice", "Delhi", false).await.is_none());
        let answer = advisor.answer(Some("rice")).await;
        assert!(answer.starts_with("💰 **Current Market Prices for Rice:**"));
    }

    #[tokio::test]
    async fn test_unavailable_answers_with_guidance() {
        let answer = PriceAdvisor::unavailable().answer(Some("corn")).await;
        assert!(answer.contains("🏪 **Government Resources:**"));
        assert!(answer.ends_with("Would you like farming advice for corn instead?"));
    }

    #[test]
    fn test_from_settings_mock() {
        let advisor = PriceAdvisor::from_settings(&MarketSettings::default());
        assert!(matches!(advisor.mode(), PriceMode::Mock));
        assert_eq!(advisor.default_market(), "Delhi");
        assert!(!advisor.has_live_feeds());
    }

    #[tokio::test]
    async fn test_from_settings_live_without_keys_is_unavailable() {
        let settings = MarketSettings {
            use_mock: false,
            agmarknet_key_env: "AGRIGENIUS_TEST_UNSET_AGMARKNET".to_string(),
            commodity_key_env: "AGRIGENIUS_TEST_UNSET_COMMODITY".to_string(),
            ..MarketSettings::default()
        };
        let advisor = PriceAdvisor::from_settings(&settings);

        assert!(matches!(advisor.mode(), PriceMode::Unavailable));
        assert!(!advisor.has_live_feeds());
        assert!(advisor
            .answer(Some("rice"))
            .await
            .contains("🏪 **Government Resources:**"));
    }

    #[test]
    fn test_from_settings_live_with_key() {
        std::env::set_var("AGRIGENIUS_TEST_COMMODITY_KEY", "secret");
        let settings = MarketSettings {
            use_mock: false,
            agmarknet_key_env: "AGRIGENIUS_TEST_UNSET_AGMARKNET".to_string(),
            commodity_key_env: "AGRIGENIUS_TEST_COMMODITY_KEY".to_string(),
            ..MarketSettings::default()
        };
        let advisor = PriceAdvisor::from_settings(&settings);
        assert!(advisor.has_live_feeds());
    }
}
