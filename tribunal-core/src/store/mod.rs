//! Dispute and evidence persistence
//!
//! Records are keyed by monotonically increasing u64 identifiers starting
//! at 0. Id assignment lives inside each store implementation as an
//! explicit counter advanced together with the insert, never a
//! process-wide global.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{Dispute, DisputeSummary, Evidence};
use async_trait::async_trait;

/// Ordered key -> value store for disputes and evidence
///
/// Insert methods take a record with a placeholder id, assign the next id
/// from the corresponding counter and return the stored record. Disputes
/// are never deleted; evidence is immutable after insertion.
#[async_trait]
pub trait DisputeStore: Send + Sync {
    /// Insert a dispute, assigning the next dispute id
    async fn insert_dispute(&self, dispute: Dispute) -> Result<Dispute>;

    /// Fetch one dispute by id
    async fn get_dispute(&self, dispute_id: u64) -> Result<Option<Dispute>>;

    /// Overwrite a stored dispute (resolve/appeal mutations)
    async fn update_dispute(&self, dispute: &Dispute) -> Result<()>;

    /// Insert an evidence record, assigning the next evidence id
    async fn insert_evidence(&self, evidence: Evidence) -> Result<Evidence>;

    /// All evidence belonging to one dispute, in id order
    async fn evidence_for_dispute(&self, dispute_id: u64) -> Result<Vec<Evidence>>;

    /// Summary of every dispute, in id order
    async fn all_disputes(&self) -> Result<Vec<DisputeSummary>>;

    /// Total number of disputes ever filed
    async fn dispute_count(&self) -> Result<u64>;

    /// Total number of evidence records ever submitted
    async fn evidence_count(&self) -> Result<u64>;
}
