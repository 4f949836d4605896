//! Price advisory for AgriGenius.
//!
//! Quotes come from a fixed mock table or from live feeds (Agmarknet and a
//! commodity end-of-day API). When no quote can be produced the advisor
//! answers with static "where to find prices" guidance instead.

pub mod advisor;
pub mod format;
pub mod live;
pub mod mock;
pub mod quote;

pub use advisor::{PriceAdvisor, PriceMode};
pub use format::{format_no_quote_guidance, format_quote_response};
pub use live::{AgmarknetFeed, CommodityApiFeed, PriceFeed};
pub use mock::mock_quote;
pub use quote::{PriceQuote, Trend};
