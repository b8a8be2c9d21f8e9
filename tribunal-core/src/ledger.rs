//! Ledger transfer interface
//!
//! Fire-and-forget from the core's perspective: there is no confirmation
//! callback. Amounts are unsigned; the payout calculator guarantees a zero
//! amount is never handed to a ledger.

use crate::error::Result;
use crate::types::Address;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Sends an amount to an address
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn transfer(&self, to: &Address, amount: u64) -> Result<()>;
}

/// In-memory ledger recording every transfer it is asked to make
#[derive(Default)]
pub struct MemoryLedger {
    transfers: Mutex<Vec<(Address, u64)>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded transfers in issue order
    pub async fn transfers(&self) -> Vec<(Address, u64)> {
        self.transfers.lock().await.clone()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn transfer(&self, to: &Address, amount: u64) -> Result<()> {
        self.transfers.lock().await.push((to.clone(), amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_ledger_records_in_order() {
        let ledger = MemoryLedger::new();
        ledger.transfer(&Address::new("0xaa"), 700).await.unwrap();
        ledger.transfer(&Address::new("0xbb"), 300).await.unwrap();
        let transfers = ledger.transfers().await;
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0], (Address::new("0xAA"), 700));
        assert_eq!(transfers[1].1, 300);
    }
}
