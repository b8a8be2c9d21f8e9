//! Validation rule engine for candidate verdicts
//!
//! Pure predicate over a raw candidate payload: no side effects, no oracle
//! calls. A candidate becomes a [`VerdictResult`] only by passing every
//! rule here; any decode error, missing field or rule violation rejects it
//! outright. This is the validator half of the leader/validator consensus
//! pair, so it must be deterministic for any input text.

use crate::types::{Verdict, VerdictCandidate, VerdictResult};
use thiserror::Error;

/// Accepted reasoning word-count window.
///
/// Wider than the 300-500 the prompt asks for, to tolerate natural variance
/// in oracle output without accepting essays or one-liners.
pub const MIN_REASONING_WORDS: usize = 250;
pub const MAX_REASONING_WORDS: usize = 600;

/// Minimum number of key factors a verdict must cite
pub const MIN_KEY_FACTORS: usize = 2;

/// Terms that mark reasoning as biased or unprofessional; matched
/// case-insensitively as substrings of the reasoning text
pub const BIAS_DENYLIST: [&str; 5] = ["obviously", "clearly wrong", "stupid", "idiot", "moron"];

/// Why a candidate payload was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("payload does not decode to the required field set: {0}")]
    Malformed(String),

    #[error("unknown verdict label '{0}'")]
    UnknownVerdict(String),

    #[error("confidence {0} outside [0,100]")]
    ConfidenceOutOfRange(i64),

    #[error("reasoning word count {0} outside [{MIN_REASONING_WORDS},{MAX_REASONING_WORDS}]")]
    ReasoningLength(usize),

    #[error("only {0} key factors (need at least {MIN_KEY_FACTORS})")]
    TooFewKeyFactors(usize),

    #[error("distribution pair ({0}, {1}) must be integers in [0,100] summing to 100")]
    BadDistribution(i64, i64),

    #[error("evidence strength pair ({0}, {1}) must be integers in [0,10]")]
    BadEvidenceWeight(i64, i64),

    #[error("reasoning contains denylisted term '{0}'")]
    BiasedLanguage(&'static str),
}

/// Validate a raw candidate payload, yielding the typed verdict on success
///
/// Rules are checked in a fixed order (decode, label, confidence, reasoning
/// length, key factors, distribution, weights, language) and the first
/// violation is returned; there is no partial credit.
pub fn validate(raw: &str) -> Result<VerdictResult, RuleViolation> {
    let candidate: VerdictCandidate =
        serde_json::from_str(raw).map_err(|e| RuleViolation::Malformed(e.to_string()))?;

    let verdict = Verdict::parse(&candidate.verdict)
        .ok_or_else(|| RuleViolation::UnknownVerdict(candidate.verdict.clone()))?;

    if !(0..=100).contains(&candidate.confidence) {
        return Err(RuleViolation::ConfidenceOutOfRange(candidate.confidence));
    }

    let word_count = candidate.reasoning.split_whitespace().count();
    if !(MIN_REASONING_WORDS..=MAX_REASONING_WORDS).contains(&word_count) {
        return Err(RuleViolation::ReasoningLength(word_count));
    }

    if candidate.key_factors.len() < MIN_KEY_FACTORS {
        return Err(RuleViolation::TooFewKeyFactors(candidate.key_factors.len()));
    }

    let plaintiff_pct = candidate.recommended_distribution.plaintiff_percent;
    let defendant_pct = candidate.recommended_distribution.defendant_percent;
    if !(0..=100).contains(&plaintiff_pct)
        || !(0..=100).contains(&defendant_pct)
        || plaintiff_pct + defendant_pct != 100
    {
        return Err(RuleViolation::BadDistribution(plaintiff_pct, defendant_pct));
    }

    let plaintiff_strength = candidate.evidence_weight.plaintiff_evidence_strength;
    let defendant_strength = candidate.evidence_weight.defendant_evidence_strength;
    if !(0..=10).contains(&plaintiff_strength) || !(0..=10).contains(&defendant_strength) {
        return Err(RuleViolation::BadEvidenceWeight(
            plaintiff_strength,
            defendant_strength,
        ));
    }

    let reasoning_lower = candidate.reasoning.to_lowercase();
    for term in BIAS_DENYLIST {
        if reasoning_lower.contains(term) {
            return Err(RuleViolation::BiasedLanguage(term));
        }
    }

    Ok(VerdictResult {
        verdict,
        confidence: candidate.confidence as u8,
        reasoning: candidate.reasoning,
        key_factors: candidate.key_factors,
        plaintiff_evidence_strength: plaintiff_strength as u8,
        defendant_evidence_strength: defendant_strength as u8,
        plaintiff_percent: plaintiff_pct as u8,
        defendant_percent: defendant_pct as u8,
    })
}

/// Boolean form of [`validate`], the shape the consensus runner expects
pub fn is_acceptable(raw: &str) -> bool {
    validate(raw).is_ok()
}
