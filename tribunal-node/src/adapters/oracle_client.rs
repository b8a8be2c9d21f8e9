//! Reasoning oracle client
//!
//! Talks to an OpenAI-compatible chat completions endpoint. Which model
//! sits behind it is a deployment choice; the core only sees the
//! [`Oracle`] trait.

use crate::config::OracleConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tribunal_core::error::{Error, Result};
use tribunal_core::oracle::{Oracle, ResponseFormat};

const USER_AGENT: &str = concat!("tribunal-node/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Chat-completions-backed [`Oracle`]
pub struct CompletionOracle {
    http_client: reqwest::Client,
    config: OracleConfig,
}

impl CompletionOracle {
    pub fn new(config: OracleConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Oracle(format!("build http client: {e}")))?;
        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl Oracle for CompletionOracle {
    async fn generate(&self, prompt: &str, response_format: ResponseFormat) -> Result<String> {
        let mut body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        if response_format == ResponseFormat::Json {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(model = %self.config.model, "Querying reasoning oracle");

        let mut request = self.http_client.post(&url).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Oracle(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Oracle(format!("oracle returned {status}: {text}")));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Oracle(format!("parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Oracle("oracle returned no choices".to_string()))
    }
}
