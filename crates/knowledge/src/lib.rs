//! Static agricultural knowledge for AgriGenius.
//!
//! Two answering sources that work without any model:
//! - [`KnowledgeStore`]: crop facts and farming-topic tips, keyword matched
//! - [`RuleResponder`]: a first-match keyword ladder that always answers
//!
//! Both hand price questions to the shared [`PriceAdvisor`].

pub mod crops;
pub mod responder;
pub mod store;
pub mod topics;
pub mod types;

pub use agrigenius_market::PriceAdvisor;
pub use responder::RuleResponder;
pub use store::KnowledgeStore;
pub use types::{CropFacts, KnowledgeEntry};

/// Price and market keywords shared by both sources.
pub(crate) const PRICE_KEYWORDS: [&str; 10] = [
    "price", "cost", "rate", "market", "sell", "buy", "मूल्य", "कीमत", "दर", "बाज़ार",
];

/// True if `text` contains any of `keywords` as a substring.
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
