//! Public operation surface of the arbitration core
//!
//! Each operation runs as one atomic unit: it either takes full effect or
//! returns an error with stored state unchanged. The host's transaction
//! boundary supplies mutual exclusion per operation, so no locking happens
//! here.

use crate::config::TribunalConfig;
use crate::error::{Error, Result};
use crate::fetch::WebFetcher;
use crate::ledger::Ledger;
use crate::oracle::{ConsensusRunner, Oracle};
use crate::payout;
use crate::services::{CredibilityScorer, EvidenceAggregator, VerdictEngine};
use crate::store::DisputeStore;
use crate::types::{
    Address, Dispute, DisputeStatus, DisputeSummary, Evidence, PlatformStats, VerdictResult,
};
use chrono::Utc;
use std::sync::Arc;

/// Input bounds enforced on the public operations
const MIN_DESCRIPTION_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_EVIDENCE_CONTENT_CHARS: usize = 10_000;
const MIN_APPEAL_REASON_CHARS: usize = 100;

/// Dispute arbitration facade
///
/// Owns the platform constants and the collaborator handles; all host
/// surfaces (HTTP, tests) drive the system exclusively through these
/// methods.
pub struct Tribunal {
    config: TribunalConfig,
    store: Arc<dyn DisputeStore>,
    ledger: Arc<dyn Ledger>,
    aggregator: EvidenceAggregator,
    scorer: CredibilityScorer,
    engine: VerdictEngine,
}

impl Tribunal {
    pub fn new(
        config: TribunalConfig,
        store: Arc<dyn DisputeStore>,
        oracle: Arc<dyn Oracle>,
        runner: Arc<dyn ConsensusRunner>,
        fetcher: Arc<dyn WebFetcher>,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        let aggregator = EvidenceAggregator::new(fetcher, config.max_evidence_urls);
        let scorer = CredibilityScorer::new(oracle);
        let engine = VerdictEngine::new(runner);
        Self {
            config,
            store,
            ledger,
            aggregator,
            scorer,
            engine,
        }
    }

    /// File a new dispute with a staked amount
    pub async fn file_dispute(
        &self,
        plaintiff: Address,
        defendant: Address,
        case_description: String,
        evidence_urls: Vec<String>,
        stake_amount: u64,
    ) -> Result<Dispute> {
        if case_description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(Error::InvalidInput(format!(
                "case description must be at least {MIN_DESCRIPTION_CHARS} characters"
            )));
        }
        if case_description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(Error::InvalidInput(format!(
                "case description too long (max {MAX_DESCRIPTION_CHARS} characters)"
            )));
        }
        if evidence_urls.len() > self.config.max_evidence_urls {
            return Err(Error::InvalidInput(format!(
                "too many evidence URLs (max {})",
                self.config.max_evidence_urls
            )));
        }
        if stake_amount < self.config.min_stake {
            return Err(Error::InvalidInput(format!(
                "minimum stake is {} tokens",
                self.config.min_stake
            )));
        }

        let dispute = self
            .store
            .insert_dispute(Dispute {
                dispute_id: 0, // assigned by the store
                plaintiff,
                defendant,
                case_description,
                evidence_urls,
                stake_amount,
                status: DisputeStatus::EvidenceGathering,
                verdict: String::new(),
                reasoning: String::new(),
                confidence_score: 0,
                plaintiff_distribution: 0,
                defendant_distribution: 0,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            dispute_id = dispute.dispute_id,
            stake = dispute.stake_amount,
            "Dispute filed"
        );
        Ok(dispute)
    }

    /// Submit additional evidence for a dispute still gathering evidence
    ///
    /// The item is credibility-scored through a single advisory oracle call
    /// before being stored.
    pub async fn submit_evidence(
        &self,
        caller: Address,
        dispute_id: u64,
        evidence_type: String,
        content: String,
    ) -> Result<Evidence> {
        let dispute = self.require_dispute(dispute_id).await?;

        if dispute.status != DisputeStatus::EvidenceGathering {
            return Err(Error::InvalidState(
                "evidence gathering period closed".to_string(),
            ));
        }
        if caller != dispute.plaintiff && caller != dispute.defendant {
            return Err(Error::InvalidInput(
                "only parties can submit evidence".to_string(),
            ));
        }
        if content.chars().count() > MAX_EVIDENCE_CONTENT_CHARS {
            return Err(Error::InvalidInput(format!(
                "evidence content too long (max {MAX_EVIDENCE_CONTENT_CHARS} characters)"
            )));
        }

        let credibility = self
            .scorer
            .score(&content, &evidence_type, &dispute.case_description)
            .await;

        let evidence = self
            .store
            .insert_evidence(Evidence {
                evidence_id: 0, // assigned by the store
                dispute_id,
                submitted_by: caller,
                evidence_type,
                content,
                credibility_score: credibility,
                submitted_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            dispute_id,
            evidence_id = evidence.evidence_id,
            credibility,
            "Evidence submitted"
        );
        Ok(evidence)
    }

    /// Resolve a dispute through the leader/validator consensus protocol
    ///
    /// On consensus failure nothing is written: the dispute stays in
    /// evidence_gathering and the caller sees the error. On acceptance the
    /// verdict fields are populated, the status moves to resolved and the
    /// staked funds are distributed.
    pub async fn resolve_dispute(&self, dispute_id: u64) -> Result<VerdictResult> {
        let mut dispute = self.require_dispute(dispute_id).await?;

        if dispute.status != DisputeStatus::EvidenceGathering {
            return Err(Error::InvalidState(
                "dispute not ready for resolution".to_string(),
            ));
        }

        let evidence = self.store.evidence_for_dispute(dispute_id).await?;
        let bundle = self.aggregator.build_bundle(&dispute, &evidence).await;

        let verdict = self.engine.decide(&dispute, &bundle).await?;

        // Settlement is computed before any write so an arithmetic guard
        // failure leaves the dispute untouched.
        let plan = payout::settle(
            dispute.stake_amount,
            self.config.platform_fee_percent,
            verdict.plaintiff_percent,
            verdict.defendant_percent,
        )?;

        dispute.verdict = verdict.verdict.as_str().to_string();
        dispute.reasoning = verdict.reasoning.clone();
        dispute.confidence_score = verdict.confidence;
        dispute.plaintiff_distribution = verdict.plaintiff_percent;
        dispute.defendant_distribution = verdict.defendant_percent;
        dispute.status = DisputeStatus::Resolved;
        self.store.update_dispute(&dispute).await?;

        // Zero amounts are never transferred; the fee and any floor-division
        // residual stay with the platform. Transfers are fire-and-forget:
        // a ledger failure is logged, never surfaced, so the resolved state
        // stands.
        if plan.plaintiff_amount > 0 {
            if let Err(e) = self
                .ledger
                .transfer(&dispute.plaintiff, plan.plaintiff_amount)
                .await
            {
                tracing::warn!(dispute_id, amount = plan.plaintiff_amount, error = %e, "Plaintiff transfer failed");
            }
        }
        if plan.defendant_amount > 0 {
            if let Err(e) = self
                .ledger
                .transfer(&dispute.defendant, plan.defendant_amount)
                .await
            {
                tracing::warn!(dispute_id, amount = plan.defendant_amount, error = %e, "Defendant transfer failed");
            }
        }

        tracing::info!(
            dispute_id,
            verdict = dispute.verdict,
            plaintiff_amount = plan.plaintiff_amount,
            defendant_amount = plan.defendant_amount,
            fee = plan.fee_amount,
            residual = plan.residual,
            "Dispute resolved and funds distributed"
        );
        Ok(verdict)
    }

    /// Appeal a resolved verdict
    ///
    /// Clears the verdict, confidence and distribution and marks the
    /// reasoning with the appeal. The status moves to appealed and stays
    /// there; appealed disputes can be neither resolved nor appealed again.
    pub async fn appeal_verdict(&self, dispute_id: u64, appeal_reason: String) -> Result<()> {
        let mut dispute = self.require_dispute(dispute_id).await?;

        if dispute.status != DisputeStatus::Resolved {
            return Err(Error::InvalidState(
                "can only appeal resolved disputes".to_string(),
            ));
        }
        if appeal_reason.chars().count() < MIN_APPEAL_REASON_CHARS {
            return Err(Error::InvalidInput(format!(
                "appeal reason must be at least {MIN_APPEAL_REASON_CHARS} characters"
            )));
        }

        dispute.status = DisputeStatus::Appealed;
        dispute.verdict = String::new();
        dispute.confidence_score = 0;
        dispute.plaintiff_distribution = 0;
        dispute.defendant_distribution = 0;
        dispute.reasoning = format!("appealed: {appeal_reason}");
        self.store.update_dispute(&dispute).await?;

        tracing::info!(dispute_id, "Verdict appealed");
        Ok(())
    }

    /// Full dispute record
    pub async fn get_dispute(&self, dispute_id: u64) -> Result<Dispute> {
        self.require_dispute(dispute_id).await
    }

    /// All evidence submitted for a dispute, in submission order
    pub async fn get_dispute_evidence(&self, dispute_id: u64) -> Result<Vec<Evidence>> {
        self.require_dispute(dispute_id).await?;
        self.store.evidence_for_dispute(dispute_id).await
    }

    /// Summary of every dispute in the system
    pub async fn get_all_disputes(&self) -> Result<Vec<DisputeSummary>> {
        self.store.all_disputes().await
    }

    /// Platform counters and constants
    pub async fn get_stats(&self) -> Result<PlatformStats> {
        Ok(PlatformStats {
            total_disputes: self.store.dispute_count().await?,
            total_evidence_submitted: self.store.evidence_count().await?,
            min_stake: self.config.min_stake,
            platform_fee_percent: self.config.platform_fee_percent,
        })
    }

    async fn require_dispute(&self, dispute_id: u64) -> Result<Dispute> {
        self.store
            .get_dispute(dispute_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("dispute {dispute_id} not found")))
    }
}
