//! HTTP web-evidence fetcher

use async_trait::async_trait;
use std::time::Duration;
use tribunal_core::error::{Error, Result};
use tribunal_core::fetch::WebFetcher;

const USER_AGENT: &str = concat!("tribunal-node/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`WebFetcher`]
///
/// Returns the response body as text; the evidence aggregator applies its
/// own truncation and recovers any failure as a marker entry.
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Fetch(format!("build http client: {e}")))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl WebFetcher for HttpFetcher {
    async fn render_text(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| Error::Fetch(e.to_string()))
    }
}
