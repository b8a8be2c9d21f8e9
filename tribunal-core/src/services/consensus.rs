//! Verdict consensus engine
//!
//! Drives one resolution attempt as a leader/validator pair: a fixed prompt
//! template (leader) and the validation rule engine (validator), submitted
//! to the injected [`ConsensusRunner`]. The runner is the host's agreement
//! mechanism; from here it is an opaque call that returns either an
//! accepted, already-validated payload or a consensus failure. No local
//! retry happens at this level - if the runner reports failure, the whole
//! resolve operation fails with stored state untouched.

use crate::error::{Error, Result};
use crate::oracle::{ConsensusRunner, LeaderRequest, ResponseFormat};
use crate::rules;
use crate::types::{Dispute, EvidenceBundle, VerdictResult};
use std::sync::Arc;

/// Leader/validator driver for verdict generation
pub struct VerdictEngine {
    runner: Arc<dyn ConsensusRunner>,
}

impl VerdictEngine {
    pub fn new(runner: Arc<dyn ConsensusRunner>) -> Self {
        Self { runner }
    }

    /// Produce the accepted verdict for a dispute, or fail with
    /// [`Error::ConsensusFailure`]
    pub async fn decide(&self, dispute: &Dispute, bundle: &EvidenceBundle) -> Result<VerdictResult> {
        let request = LeaderRequest {
            prompt: build_prompt(dispute, bundle)?,
            response_format: ResponseFormat::Json,
        };

        let validator = |raw: &str| rules::is_acceptable(&strip_code_fences(raw));
        let accepted = self.runner.run_with_consensus(request, &validator).await?;

        // The runner only returns validator-accepted text, so this re-run of
        // the rule engine is the typed conversion, not a second opinion.
        let cleaned = strip_code_fences(&accepted);
        let result = rules::validate(&cleaned).map_err(|violation| {
            Error::ConsensusFailure(format!(
                "runner returned a payload the rule engine rejects: {violation}"
            ))
        })?;

        tracing::info!(
            dispute_id = dispute.dispute_id,
            verdict = result.verdict.as_str(),
            confidence = result.confidence,
            "Verdict accepted"
        );
        Ok(result)
    }
}

/// Strip markdown code-fence wrapping from an oracle response
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn build_prompt(dispute: &Dispute, bundle: &EvidenceBundle) -> Result<String> {
    let web_evidence = serde_json::to_string_pretty(&bundle.web_evidence)
        .map_err(|e| Error::Internal(format!("serialize web evidence: {e}")))?;
    let submitted_evidence = serde_json::to_string_pretty(&bundle.submitted_evidence)
        .map_err(|e| Error::Internal(format!("serialize submitted evidence: {e}")))?;

    Ok(format!(
        r#"You are a decentralized arbitration AI analyzing a dispute fairly and objectively.

CASE DESCRIPTION:
{case_description}

PLAINTIFF: {plaintiff}
DEFENDANT: {defendant}

EVIDENCE COLLECTED:
Web Evidence: {web_evidence}
Submitted Evidence: {submitted_evidence}

PROVIDE A VERDICT IN STRICT JSON FORMAT:
{{
    "verdict": "plaintiff_wins" | "defendant_wins" | "split_ruling" | "insufficient_evidence",
    "confidence": <integer 0-100>,
    "reasoning": "<detailed 300-500 word explanation>",
    "key_factors": ["factor1", "factor2", "factor3"],
    "evidence_weight": {{
        "plaintiff_evidence_strength": <integer 0-10>,
        "defendant_evidence_strength": <integer 0-10>
    }},
    "recommended_distribution": {{
        "plaintiff_percent": <integer 0-100>,
        "defendant_percent": <integer 0-100>
    }}
}}

CRITICAL REQUIREMENTS:
1. Your reasoning MUST be 300-500 words
2. Be impartial and evidence-based
3. Cite specific evidence in your reasoning
4. Distribution percentages must sum to 100
5. Confidence must be 0-100
6. Include at least 3 key factors

Return ONLY valid JSON, no markdown, no code blocks."#,
        case_description = dispute.case_description,
        plaintiff = dispute.plaintiff,
        defendant = dispute.defendant,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::ScriptedConsensusRunner;
    use crate::types::{Address, DisputeStatus, Verdict};
    use chrono::Utc;
    use serde_json::json;

    fn sample_dispute() -> Dispute {
        Dispute {
            dispute_id: 7,
            plaintiff: Address::new("0xplaintiff"),
            defendant: Address::new("0xdefendant"),
            case_description: "the defendant failed to deliver goods paid for in full".to_string(),
            evidence_urls: vec![],
            stake_amount: 1000,
            status: DisputeStatus::EvidenceGathering,
            verdict: String::new(),
            reasoning: String::new(),
            confidence_score: 0,
            plaintiff_distribution: 0,
            defendant_distribution: 0,
            created_at: Utc::now(),
        }
    }

    fn acceptable_payload() -> String {
        let reasoning = vec!["the delivery records and payment trail support the claim"; 50]
            .join(" ")
            .split_whitespace()
            .take(300)
            .collect::<Vec<_>>()
            .join(" ");
        json!({
            "verdict": "plaintiff_wins",
            "confidence": 82,
            "reasoning": reasoning,
            "key_factors": ["payment trail", "delivery records", "no rebuttal"],
            "evidence_weight": {
                "plaintiff_evidence_strength": 8,
                "defendant_evidence_strength": 2
            },
            "recommended_distribution": {
                "plaintiff_percent": 80,
                "defendant_percent": 20
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn accepted_payload_becomes_typed_verdict() {
        let runner = Arc::new(ScriptedConsensusRunner::new(vec![acceptable_payload()]));
        let engine = VerdictEngine::new(runner);
        let result = engine
            .decide(&sample_dispute(), &EvidenceBundle::default())
            .await
            .unwrap();
        assert_eq!(result.verdict, Verdict::PlaintiffWins);
        assert_eq!(result.confidence, 82);
        assert_eq!(result.plaintiff_percent, 80);
    }

    #[tokio::test]
    async fn code_fenced_payload_is_accepted() {
        let fenced = format!("```json\n{}\n```", acceptable_payload());
        let runner = Arc::new(ScriptedConsensusRunner::new(vec![fenced]));
        let engine = VerdictEngine::new(runner);
        let result = engine
            .decide(&sample_dispute(), &EvidenceBundle::default())
            .await
            .unwrap();
        assert_eq!(result.verdict, Verdict::PlaintiffWins);
    }

    #[tokio::test]
    async fn malformed_candidates_fail_consensus() {
        let runner = Arc::new(ScriptedConsensusRunner::new(vec![
            "not json at all".to_string(),
            json!({"verdict": "plaintiff_wins"}).to_string(),
        ]));
        let engine = VerdictEngine::new(runner);
        let result = engine
            .decide(&sample_dispute(), &EvidenceBundle::default())
            .await;
        assert!(matches!(result, Err(Error::ConsensusFailure(_))));
    }

    #[tokio::test]
    async fn rejected_then_accepted_candidate_wins() {
        // The runner owns retry: a rejected executor output followed by an
        // acceptable one still resolves.
        let runner = Arc::new(ScriptedConsensusRunner::new(vec![
            "garbage".to_string(),
            acceptable_payload(),
        ]));
        let engine = VerdictEngine::new(runner);
        let result = engine
            .decide(&sample_dispute(), &EvidenceBundle::default())
            .await
            .unwrap();
        assert_eq!(result.verdict, Verdict::PlaintiffWins);
    }

    #[test]
    fn prompt_embeds_case_and_parties() {
        let dispute = sample_dispute();
        let prompt = build_prompt(&dispute, &EvidenceBundle::default()).unwrap();
        assert!(prompt.contains(&dispute.case_description));
        assert!(prompt.contains("0xplaintiff"));
        assert!(prompt.contains("0xdefendant"));
        assert!(prompt.contains("STRICT JSON FORMAT"));
    }

    #[test]
    fn fence_stripping_handles_plain_text() {
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
    }
}
