//! Domain model for disputes, evidence and verdicts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque party identifier (a hex account string in practice)
///
/// Equality is case-insensitive so that differently-cased renderings of the
/// same account compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dispute lifecycle status
///
/// Transitions only along evidence_gathering -> resolved -> appealed.
/// Appealed is terminal: an appealed dispute is never resolved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    EvidenceGathering,
    Resolved,
    Appealed,
}

impl DisputeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::EvidenceGathering => "evidence_gathering",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::Appealed => "appealed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "evidence_gathering" => Some(DisputeStatus::EvidenceGathering),
            "resolved" => Some(DisputeStatus::Resolved),
            "appealed" => Some(DisputeStatus::Appealed),
            _ => None,
        }
    }
}

/// Verdict label produced by the reasoning oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    PlaintiffWins,
    DefendantWins,
    SplitRuling,
    InsufficientEvidence,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::PlaintiffWins => "plaintiff_wins",
            Verdict::DefendantWins => "defendant_wins",
            Verdict::SplitRuling => "split_ruling",
            Verdict::InsufficientEvidence => "insufficient_evidence",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plaintiff_wins" => Some(Verdict::PlaintiffWins),
            "defendant_wins" => Some(Verdict::DefendantWins),
            "split_ruling" => Some(Verdict::SplitRuling),
            "insufficient_evidence" => Some(Verdict::InsufficientEvidence),
            _ => None,
        }
    }
}

/// Top-level dispute record
///
/// Owned exclusively by the dispute store; mutated only through the
/// resolve/appeal operations; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    pub dispute_id: u64,
    pub plaintiff: Address,
    pub defendant: Address,
    pub case_description: String,
    pub evidence_urls: Vec<String>,
    pub stake_amount: u64,
    pub status: DisputeStatus,
    /// Empty until resolved; cleared again on appeal
    pub verdict: String,
    pub reasoning: String,
    pub confidence_score: u8,
    pub plaintiff_distribution: u8,
    pub defendant_distribution: u8,
    pub created_at: DateTime<Utc>,
}

/// Party-submitted evidence record, immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub evidence_id: u64,
    pub dispute_id: u64,
    pub submitted_by: Address,
    pub evidence_type: String,
    pub content: String,
    pub credibility_score: u8,
    pub submitted_at: DateTime<Utc>,
}

/// Which party a piece of evidence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Plaintiff,
    Defendant,
}

/// One fetched web-evidence item (content is truncated text or a failure marker)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEvidenceItem {
    pub url: String,
    pub content: String,
}

/// One submitted-evidence item as presented to the oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedEvidenceItem {
    #[serde(rename = "type")]
    pub evidence_type: String,
    pub content: String,
    pub credibility: u8,
    pub submitted_by: PartyRole,
}

/// Transient evidence bundle fed to the oracle; rebuilt on every resolution
/// attempt, never persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub web_evidence: Vec<WebEvidenceItem>,
    pub submitted_evidence: Vec<SubmittedEvidenceItem>,
}

/// Evidence-weight pair from the verdict payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceWeight {
    pub plaintiff_evidence_strength: i64,
    pub defendant_evidence_strength: i64,
}

/// Recommended stake split from the verdict payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Distribution {
    pub plaintiff_percent: i64,
    pub defendant_percent: i64,
}

/// Raw verdict payload as decoded from the oracle's JSON, before any rule
/// has been checked
///
/// Fields are deliberately loose (strings and wide integers) so that range
/// and enum checks are rule rejections, not decode failures. The strict
/// part of decoding is the field set itself: unknown or missing fields fail
/// the decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerdictCandidate {
    pub verdict: String,
    pub confidence: i64,
    pub reasoning: String,
    pub key_factors: Vec<String>,
    pub evidence_weight: EvidenceWeight,
    pub recommended_distribution: Distribution,
}

/// A verdict that passed the validation rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub verdict: Verdict,
    pub confidence: u8,
    pub reasoning: String,
    pub key_factors: Vec<String>,
    pub plaintiff_evidence_strength: u8,
    pub defendant_evidence_strength: u8,
    pub plaintiff_percent: u8,
    pub defendant_percent: u8,
}

/// Summary view of a dispute (listing endpoints)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeSummary {
    pub dispute_id: u64,
    pub plaintiff: Address,
    pub defendant: Address,
    pub status: DisputeStatus,
    pub verdict: String,
}

/// Platform-wide counters and constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_disputes: u64,
    pub total_evidence_submitted: u64,
    pub min_stake: u64,
    pub platform_fee_percent: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_equality_ignores_case() {
        let a = Address::new("0xAbCd01");
        let b = Address::new("0xabcd01");
        let c = Address::new("0xabcd02");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            DisputeStatus::EvidenceGathering,
            DisputeStatus::Resolved,
            DisputeStatus::Appealed,
        ] {
            assert_eq!(DisputeStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DisputeStatus::parse("open"), None);
    }

    #[test]
    fn verdict_labels_match_wire_form() {
        assert_eq!(Verdict::parse("plaintiff_wins"), Some(Verdict::PlaintiffWins));
        assert_eq!(Verdict::parse("split_ruling"), Some(Verdict::SplitRuling));
        assert_eq!(Verdict::parse("guilty"), None);
        assert_eq!(
            serde_json::to_string(&Verdict::InsufficientEvidence).unwrap(),
            "\"insufficient_evidence\""
        );
    }

    #[test]
    fn candidate_rejects_unknown_fields() {
        let payload = serde_json::json!({
            "verdict": "plaintiff_wins",
            "confidence": 80,
            "reasoning": "because",
            "key_factors": ["a", "b"],
            "evidence_weight": {
                "plaintiff_evidence_strength": 7,
                "defendant_evidence_strength": 3
            },
            "recommended_distribution": {
                "plaintiff_percent": 70,
                "defendant_percent": 30
            },
            "extra": true
        });
        let parsed: std::result::Result<VerdictCandidate, _> =
            serde_json::from_value(payload);
        assert!(parsed.is_err());
    }
}
