//! Answering sources the pipeline selects between.
//!
//! The pipeline owns each source behind one of these traits, so tests can
//! swap in counting fakes and no source ever reaches into another.

use agrigenius_knowledge::{KnowledgeStore, RuleResponder};

/// A lookup that may have nothing to say.
#[async_trait::async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn search(&self, query: &str) -> Option<String>;
}

/// The last resort. Always answers.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, query: &str) -> String;
}

#[async_trait::async_trait]
impl KnowledgeSource for KnowledgeStore {
    async fn search(&self, query: &str) -> Option<String> {
        KnowledgeStore::search(self, query).await
    }
}

#[async_trait::async_trait]
impl Responder for RuleResponder {
    async fn respond(&self, query: &str) -> String {
        RuleResponder::respond(self, query).await
    }
}
