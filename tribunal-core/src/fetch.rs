//! Web content fetch interface
//!
//! External collaborator that renders a URL to text. Failures are expected
//! and are recovered by the evidence aggregator, never propagated out of
//! it.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Renders a URL to readable text
#[async_trait]
pub trait WebFetcher: Send + Sync {
    async fn render_text(&self, url: &str) -> Result<String>;
}

/// In-memory fetcher serving a fixed url -> content map
///
/// Unknown URLs fail with [`crate::Error::Fetch`], which is how tests
/// exercise the aggregator's failure-marker path.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self { pages }
    }

    pub fn with_page(mut self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.pages.insert(url.into(), content.into());
        self
    }
}

#[async_trait]
impl WebFetcher for StaticFetcher {
    async fn render_text(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| crate::Error::Fetch(format!("no content for {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_fetcher_serves_known_urls_only() {
        let fetcher = StaticFetcher::default().with_page("https://a.example", "page text");
        assert_eq!(
            fetcher.render_text("https://a.example").await.unwrap(),
            "page text"
        );
        assert!(fetcher.render_text("https://b.example").await.is_err());
    }
}
