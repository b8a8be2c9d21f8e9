//! Node configuration
//!
//! Loaded from a TOML file with zero-config defaults; CLI flags and
//! environment variables override file values (highest priority first:
//! CLI, env, file, compiled default - the env handling lives in the clap
//! definitions in main).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tribunal_core::TribunalConfig;

/// Reasoning oracle endpoint settings (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,

    #[serde(default = "default_oracle_model")]
    pub model: String,

    /// Bearer token; empty disables the Authorization header
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_oracle_base_url() -> String {
    // Ollama's OpenAI-compatible endpoint; any compatible server works
    "http://127.0.0.1:11434/v1".to_string()
}

fn default_oracle_model() -> String {
    "llama3.1".to_string()
}

fn default_oracle_timeout_secs() -> u64 {
    120
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: default_oracle_base_url(),
            model: default_oracle_model(),
            api_key: String::new(),
            timeout_secs: default_oracle_timeout_secs(),
        }
    }
}

/// Full node configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Independent leader executions the local quorum runner may make
    #[serde(default = "default_consensus_attempts")]
    pub consensus_attempts: u32,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub tribunal: TribunalConfig,
}

fn default_bind() -> String {
    "127.0.0.1:5780".to_string()
}

fn default_database() -> PathBuf {
    PathBuf::from("tribunal.db")
}

fn default_consensus_attempts() -> u32 {
    3
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            database: default_database(),
            consensus_attempts: default_consensus_attempts(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            oracle: OracleConfig::default(),
            tribunal: TribunalConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Load from a TOML file; a missing file yields compiled defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parse config file {}", path.display()))
            }
            Some(path) => {
                tracing::warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero_config() {
        let config = NodeConfig::default();
        assert_eq!(config.bind, "127.0.0.1:5780");
        assert_eq!(config.consensus_attempts, 3);
        assert_eq!(config.tribunal.min_stake, 10);
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let config: NodeConfig = toml::from_str(
            r#"
            bind = "0.0.0.0:8080"

            [oracle]
            model = "gpt-4o-mini"

            [tribunal]
            min_stake = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.oracle.model, "gpt-4o-mini");
        assert_eq!(config.oracle.timeout_secs, 120);
        assert_eq!(config.tribunal.min_stake, 25);
        assert_eq!(config.tribunal.platform_fee_percent, 1);
    }
}
