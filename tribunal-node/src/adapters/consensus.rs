//! Local quorum consensus runner
//!
//! Stand-in for a host with genuinely independent executors: performs up to
//! `attempts` independent leader executions against the oracle and accepts
//! the first one the validator passes. Retrying lives here, on the runner
//! side of the contract - the core never retries a rejected candidate.

use async_trait::async_trait;
use std::sync::Arc;
use tribunal_core::error::{Error, Result};
use tribunal_core::oracle::{ConsensusRunner, LeaderRequest, Oracle, ValidatorFn};

pub struct LocalQuorumRunner {
    oracle: Arc<dyn Oracle>,
    attempts: u32,
}

impl LocalQuorumRunner {
    pub fn new(oracle: Arc<dyn Oracle>, attempts: u32) -> Self {
        Self {
            oracle,
            attempts: attempts.max(1),
        }
    }
}

#[async_trait]
impl ConsensusRunner for LocalQuorumRunner {
    async fn run_with_consensus(
        &self,
        request: LeaderRequest,
        validator: ValidatorFn<'_>,
    ) -> Result<String> {
        for attempt in 1..=self.attempts {
            let candidate = match self
                .oracle
                .generate(&request.prompt, request.response_format)
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Leader execution failed");
                    continue;
                }
            };

            if validator(&candidate) {
                tracing::debug!(attempt, "Candidate accepted by validator");
                return Ok(candidate);
            }
            tracing::debug!(attempt, "Candidate rejected by validator");
        }

        Err(Error::ConsensusFailure(format!(
            "no accepted verdict after {} leader executions",
            self.attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_core::oracle::{ResponseFormat, ScriptedOracle};

    fn request() -> LeaderRequest {
        LeaderRequest {
            prompt: "decide".to_string(),
            response_format: ResponseFormat::Json,
        }
    }

    #[tokio::test]
    async fn first_accepted_execution_wins() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            "rejected".to_string(),
            "accepted".to_string(),
        ]));
        let runner = LocalQuorumRunner::new(oracle, 3);
        let result = runner
            .run_with_consensus(request(), &|text| text == "accepted")
            .await
            .unwrap();
        assert_eq!(result, "accepted");
    }

    #[tokio::test]
    async fn exhausted_attempts_is_consensus_failure() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            "no".to_string(),
            "no".to_string(),
        ]));
        let runner = LocalQuorumRunner::new(oracle, 2);
        let result = runner.run_with_consensus(request(), &|_| false).await;
        assert!(matches!(result, Err(Error::ConsensusFailure(_))));
    }

    #[tokio::test]
    async fn oracle_errors_count_as_attempts() {
        // Script exhausted immediately: every attempt errors, none validates
        let oracle = Arc::new(ScriptedOracle::new(vec![]));
        let runner = LocalQuorumRunner::new(oracle, 3);
        let result = runner.run_with_consensus(request(), &|_| true).await;
        assert!(matches!(result, Err(Error::ConsensusFailure(_))));
    }
}
