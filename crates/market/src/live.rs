//! Live price feeds.
//!
//! - Agmarknet: https://data.gov.in (daily mandi prices, Rs./quintal)
//! - Commodity API: marketstack-style end-of-day quotes

use std::time::Duration;

use agrigenius_core::{AppError, AppResult};
use serde_json::Value;

use crate::quote::{PriceQuote, Trend};

const NOT_AVAILABLE: &str = "N/A";

/// A live source of commodity quotes.
#[async_trait::async_trait]
pub trait PriceFeed: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the latest quote for `commodity` at `market`.
    async fn fetch(&self, commodity: &str, market: &str) -> AppResult<PriceQuote>;
}

/// Agmarknet mandi prices via the data.gov.in resource API.
pub struct AgmarknetFeed {
    endpoint: String,
    api_key: String,
    limit: u32,
    timeout: Duration,
    client: reqwest::Client,
}

impl AgmarknetFeed {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            limit: 10,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn parse(body: &Value, commodity: &str, market: &str) -> AppResult<PriceQuote> {
        let record = body
            .get("records")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .ok_or_else(|| AppError::Market(format!("Agmarknet has no records for {}", commodity)))?;

        Ok(PriceQuote {
            commodity: text_field(record, "commodity").unwrap_or_else(|| commodity.to_string()),
            market: text_field(record, "market").unwrap_or_else(|| market.to_string()),
            price: text_field(record, "modal_price")
                .map(|p| format!("₹{} per quintal", p))
                .unwrap_or_else(na),
            date: text_field(record, "arrival_date").unwrap_or_else(na),
            trend: Trend::Stable,
            change: na(),
            min_price: text_field(record, "min_price")
                .map(|p| format!("₹{}", p))
                .unwrap_or_else(na),
            max_price: text_field(record, "max_price")
                .map(|p| format!("₹{}", p))
                .unwrap_or_else(na),
            quality: text_field(record, "variety").unwrap_or_else(na),
        })
    }
}

#[async_trait::async_trait]
impl PriceFeed for AgmarknetFeed {
    fn name(&self) -> &str {
        "agmarknet"
    }

    async fn fetch(&self, commodity: &str, market: &str) -> AppResult<PriceQuote> {
        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("filters[commodity]", commodity),
                ("filters[market]", market),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Market(format!("Agmarknet request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Market(format!(
                "Agmarknet returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Market(format!("Invalid Agmarknet response: {}", e)))?;
        Self::parse(&body, commodity, market)
    }
}

/// End-of-day commodity quotes (marketstack `eod` endpoint shape).
pub struct CommodityApiFeed {
    endpoint: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl CommodityApiFeed {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn parse(body: &Value, commodity: &str, market: &str) -> AppResult<PriceQuote> {
        let record = body
            .get("data")
            .and_then(Value::as_array)
            .and_then(|data| data.first())
            .ok_or_else(|| AppError::Market(format!("No end-of-day data for {}", commodity)))?;

        let close = record.get("close").and_then(Value::as_f64);
        let open = record.get("open").and_then(Value::as_f64);
        let (trend, change) = match (close, open) {
            (Some(close), Some(open)) => {
                let delta = close - open;
                (Trend::from_change(delta), format!("{:+.2}", delta))
            }
            _ => (Trend::Stable, na()),
        };

        Ok(PriceQuote {
            commodity: text_field(record, "symbol").unwrap_or_else(|| commodity.to_uppercase()),
            market: text_field(record, "exchange").unwrap_or_else(|| market.to_string()),
            price: close.map(|c| format!("{:.2}", c)).unwrap_or_else(na),
            date: text_field(record, "date")
                .map(|d| d.chars().take(10).collect())
                .unwrap_or_else(na),
            trend,
            change,
            min_price: number_field(record, "low").unwrap_or_else(na),
            max_price: number_field(record, "high").unwrap_or_else(na),
            quality: na(),
        })
    }
}

#[async_trait::async_trait]
impl PriceFeed for CommodityApiFeed {
    fn name(&self) -> &str {
        "commodity-api"
    }

    async fn fetch(&self, commodity: &str, market: &str) -> AppResult<PriceQuote> {
        let symbol = commodity.trim().to_uppercase();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("symbols", symbol.as_str()),
                ("limit", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Market(format!("Commodity API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Market(format!(
                "Commodity API returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Market(format!("Invalid commodity API response: {}", e)))?;
        Self::parse(&body, commodity, market)
    }
}

fn na() -> String {
    NOT_AVAILABLE.to_string()
}

/// A non-empty string or number field rendered as text.
fn text_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .map(|n| format!("{:.2}", n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_agmarknet_first_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resource"))
            .and(query_param("api-key", "k"))
            .and(query_param("format", "json"))
            .and(query_param("filters[commodity]", "Wheat"))
            .and(query_param("filters[market]", "Delhi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {
                        "commodity": "Wheat",
                        "market": "Azadpur",
                        "modal_price": "2275",
                        "arrival_date": "15/03/2024",
                        "min_price": "2200",
                        "max_price": "2350"
                    },
                    {"commodity": "Wheat", "market": "Narela", "modal_price": "2000"}
                ]
            })))
            .mount(&server)
            .await;

        let feed = AgmarknetFeed::new(format!("{}/resource", server.uri()), "k", Duration::from_secs(5));
        let quote = feed.fetch("Wheat", "Delhi").await.unwrap();

        assert_eq!(quote.market, "Azadpur");
        assert_eq!(quote.price, "₹2275 per quintal");
        assert_eq!(quote.min_price, "₹2200");
        assert_eq!(quote.trend, Trend::Stable);
        assert_eq!(quote.change, "N/A");
        assert_eq!(quote.quality, "N/A");
    }

    #[tokio::test]
    async fn test_agmarknet_empty_records_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .mount(&server)
            .await;

        let feed = AgmarknetFeed::new(server.uri(), "k", Duration::from_secs(5));
        assert!(feed.fetch("Rice", "Delhi").await.is_err());
    }

    #[tokio::test]
    async fn test_commodity_api_trend_from_open_close() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/eod"))
            .and(query_param("symbols", "CORN"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "symbol": "CORN",
                    "exchange": "XCBT",
                    "open": 20.0,
                    "close": 19.5,
                    "low": 19.25,
                    "high": 20.1,
                    "date": "2024-03-15T00:00:00+0000"
                }]
            })))
            .mount(&server)
            .await;

        let feed = CommodityApiFeed::new(format!("{}/v1/eod", server.uri()), "k", Duration::from_secs(5));
        let quote = feed.fetch("corn", "Delhi").await.unwrap();

        assert_eq!(quote.commodity, "CORN");
        assert_eq!(quote.price, "19.50");
        assert_eq!(quote.trend, Trend::Down);
        assert_eq!(quote.change, "-0.50");
        assert_eq!(quote.date, "2024-03-15");
        assert_eq!(quote.max_price, "20.10");
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let feed = CommodityApiFeed::new(server.uri(), "bad", Duration::from_secs(5));
        let err = feed.fetch("wheat", "Delhi").await.unwrap_err();
        assert!(matches!(err, AppError::Market(ref msg) if msg.contains("401")));
    }
}
