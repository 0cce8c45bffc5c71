//! Built-in knowledge base for blood donation topics.
//!
//! Articles ship with the binary; search is keyword scoring over the
//! lowercased query, so it works offline and never blocks on I/O.

use async_trait::async_trait;
use tracing::debug;

use hemolink_core::knowledge::{KnowledgeBase, KnowledgeSnippet};

mod articles;

use articles::{ARTICLES, Article};

/// Snippets below this score are considered noise and dropped.
const MIN_SCORE: f32 = 0.05;

/// How many snippets a single query may return.
const MAX_SNIPPETS: usize = 2;

/// A knowledge base backed by the compiled-in article set.
pub struct StaticKnowledgeBase {
    articles: &'static [Article],
}

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self { articles: ARTICLES }
    }

    /// Score one article against a lowercased query.
    ///
    /// Each keyword hit counts 1.0; each additional occurrence of a query
    /// word inside the article body counts 0.1. A topic-word match in the
    /// query counts like a keyword hit.
    fn score(article: &Article, query: &str) -> f32 {
        let mut score = 0.0_f32;

        for keyword in article.keywords {
            if query.contains(keyword) {
                score += 1.0;
            }
        }

        // Only distinctive topic words count; short ones like "blood"
        // appear in nearly every donation question.
        let topic = article.topic.to_lowercase();
        for word in topic.split_whitespace() {
            if word.len() > 5 && query.contains(word) {
                score += 1.0;
            }
        }

        let body = article.content.to_lowercase();
        for word in query.split_whitespace() {
            if word.len() > 3 {
                score += 0.1 * body.matches(word).count() as f32;
            }
        }

        score
    }
}

impl Default for StaticKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeBase for StaticKnowledgeBase {
    async fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        let query = query.to_lowercase();

        let mut scored: Vec<KnowledgeSnippet> = self
            .articles
            .iter()
            .map(|article| KnowledgeSnippet {
                topic: article.topic.to_string(),
                content: article.content.to_string(),
                score: Self::score(article, &query),
            })
            .filter(|snippet| snippet.score >= MIN_SCORE)
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(MAX_SNIPPETS);

        debug!(query = %query, hits = scored.len(), "knowledge search");
        scored
    }
}
