//! Transfer outbox ledger
//!
//! Settlement rails are host-specific; this adapter records each transfer
//! instruction in a SQLite outbox table for an external settlement process
//! to pick up. Fire-and-forget from the core's perspective.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tribunal_core::error::Result;
use tribunal_core::ledger::Ledger;
use tribunal_core::types::Address;

pub struct OutboxLedger {
    pool: SqlitePool,
}

impl OutboxLedger {
    /// Wrap a pool, creating the outbox table if needed
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transfers (
                transfer_id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipient TEXT NOT NULL,
                amount INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Ledger for OutboxLedger {
    async fn transfer(&self, to: &Address, amount: u64) -> Result<()> {
        // The core never requests zero-amount transfers; keep the outbox
        // clean even if a caller does.
        if amount == 0 {
            tracing::warn!(recipient = %to, "Ignoring zero-amount transfer");
            return Ok(());
        }

        sqlx::query("INSERT INTO transfers (recipient, amount, created_at) VALUES (?, ?, ?)")
            .bind(to.as_str())
            .bind(amount as i64)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        tracing::info!(recipient = %to, amount, "Transfer queued");
        Ok(())
    }
}
