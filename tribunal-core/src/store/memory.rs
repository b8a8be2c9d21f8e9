//! In-memory dispute store
//!
//! Backing store for tests and ephemeral deployments. Counters live inside
//! the same mutex as the maps so id assignment is transactional with the
//! insert.

use crate::error::Result;
use crate::store::DisputeStore;
use crate::types::{Dispute, DisputeSummary, Evidence};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    disputes: BTreeMap<u64, Dispute>,
    evidence: BTreeMap<u64, Evidence>,
    dispute_counter: u64,
    evidence_counter: u64,
}

/// BTreeMap-backed store with atomic id assignment
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DisputeStore for MemoryStore {
    async fn insert_dispute(&self, mut dispute: Dispute) -> Result<Dispute> {
        let mut inner = self.inner.lock().await;
        dispute.dispute_id = inner.dispute_counter;
        inner.dispute_counter += 1;
        inner.disputes.insert(dispute.dispute_id, dispute.clone());
        Ok(dispute)
    }

    async fn get_dispute(&self, dispute_id: u64) -> Result<Option<Dispute>> {
        Ok(self.inner.lock().await.disputes.get(&dispute_id).cloned())
    }

    async fn update_dispute(&self, dispute: &Dispute) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.disputes.insert(dispute.dispute_id, dispute.clone());
        Ok(())
    }

    async fn insert_evidence(&self, mut evidence: Evidence) -> Result<Evidence> {
        let mut inner = self.inner.lock().await;
        evidence.evidence_id = inner.evidence_counter;
        inner.evidence_counter += 1;
        inner.evidence.insert(evidence.evidence_id, evidence.clone());
        Ok(evidence)
    }

    async fn evidence_for_dispute(&self, dispute_id: u64) -> Result<Vec<Evidence>> {
        Ok(self
            .inner
            .lock()
            .await
            .evidence
            .values()
            .filter(|e| e.dispute_id == dispute_id)
            .cloned()
            .collect())
    }

    async fn all_disputes(&self) -> Result<Vec<DisputeSummary>> {
        Ok(self
            .inner
            .lock()
            .await
            .disputes
            .values()
            .map(|d| DisputeSummary {
                dispute_id: d.dispute_id,
                plaintiff: d.plaintiff.clone(),
                defendant: d.defendant.clone(),
                status: d.status,
                verdict: d.verdict.clone(),
            })
            .collect())
    }

    async fn dispute_count(&self) -> Result<u64> {
        Ok(self.inner.lock().await.dispute_counter)
    }

    async fn evidence_count(&self) -> Result<u64> {
        Ok(self.inner.lock().await.evidence_counter)
    }
}
