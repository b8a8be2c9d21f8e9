//! Reasoning oracle and consensus runner interfaces
//!
//! The oracle is a black-box text generator: the same prompt may yield
//! different text on every call. Single-shot calls (credibility scoring)
//! use [`Oracle`] directly. Verdict generation goes through a
//! [`ConsensusRunner`], which reconciles however many independent
//! leader/validator executions the host performs into exactly one accepted
//! payload or a consensus failure. The core never retries locally; any
//! retrying belongs to the runner implementation.

use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Requested shape of the oracle's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

/// One leader generation request: the fixed prompt plus the response format
/// the validator expects to parse
#[derive(Debug, Clone)]
pub struct LeaderRequest {
    pub prompt: String,
    pub response_format: ResponseFormat,
}

/// Pure predicate over a candidate payload text
pub type ValidatorFn<'a> = &'a (dyn Fn(&str) -> bool + Send + Sync);

/// Non-deterministic text generator
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Issue one prompt and return the raw response text
    async fn generate(&self, prompt: &str, response_format: ResponseFormat) -> Result<String>;
}

/// Opaque multi-execution agreement collaborator
///
/// Submits the leader request and the validator predicate to the host's
/// agreement mechanism. The returned text is already validator-accepted;
/// if no accepted result exists the call fails with
/// [`Error::ConsensusFailure`] and the caller must fail its operation
/// entirely (no partial or default result is ever substituted).
#[async_trait]
pub trait ConsensusRunner: Send + Sync {
    async fn run_with_consensus(
        &self,
        request: LeaderRequest,
        validator: ValidatorFn<'_>,
    ) -> Result<String>;
}

/// In-memory oracle returning scripted responses in order
///
/// Errors once the script runs out, which keeps tests honest about how many
/// oracle calls a path makes.
pub struct ScriptedOracle {
    responses: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, _prompt: &str, _response_format: ResponseFormat) -> Result<String> {
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(Error::Oracle("scripted oracle exhausted".to_string()));
        }
        Ok(responses.remove(0))
    }
}

/// In-memory consensus runner fed with scripted candidate payloads
///
/// Emulates the host's independent executors: each scripted candidate is
/// one executor's leader output, and the first one the validator accepts
/// wins. If none is accepted the run is a consensus failure.
pub struct ScriptedConsensusRunner {
    candidates: Mutex<Vec<String>>,
}

impl ScriptedConsensusRunner {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates: Mutex::new(candidates),
        }
    }
}

#[async_trait]
impl ConsensusRunner for ScriptedConsensusRunner {
    async fn run_with_consensus(
        &self,
        _request: LeaderRequest,
        validator: ValidatorFn<'_>,
    ) -> Result<String> {
        let candidates = std::mem::take(&mut *self.candidates.lock().await);
        for candidate in candidates {
            if validator(&candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::ConsensusFailure(
            "no scripted candidate passed validation".to_string(),
        ))
    }
}
