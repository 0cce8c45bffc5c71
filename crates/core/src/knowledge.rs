//! Knowledge base trait — ranked snippet lookup for a user query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A ranked text excerpt returned by the knowledge lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    /// Short topic label (e.g., "eligibility").
    pub topic: String,
    /// The text block injected into the system prompt.
    pub content: String,
    /// Relevance score; higher is better.
    pub score: f32,
}

/// Read-only ranked search over the knowledge corpus.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Snippets relevant to `query`, best match first. May be empty.
    async fn search(&self, query: &str) -> Vec<KnowledgeSnippet>;
}
