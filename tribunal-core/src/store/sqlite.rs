//! SQLite dispute store
//!
//! Schema is created with `CREATE TABLE IF NOT EXISTS` at pool init.
//! Id counters are rows in a `counters` table, advanced in the
//! same transaction as the insert they serve. The evidence-URL list is
//! flattened to a newline-joined TEXT column at this boundary only; the
//! domain type stays `Vec<String>`.

use crate::error::Result;
use crate::store::DisputeStore;
use crate::types::{Address, Dispute, DisputeStatus, DisputeSummary, Evidence};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::Path;

/// sqlx-backed store over a shared SQLite pool
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path` and run migrations
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::Error::Internal(format!("create db dir: {e}")))?;
        }
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        tracing::debug!("Connecting to database: {}", db_url);
        let pool = SqlitePool::connect(&db_url).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, running migrations
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        init_tables(&pool).await?;
        Ok(Self { pool })
    }

    /// Underlying pool, for host adapters sharing the database
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS disputes (
            dispute_id INTEGER PRIMARY KEY,
            plaintiff TEXT NOT NULL,
            defendant TEXT NOT NULL,
            case_description TEXT NOT NULL,
            evidence_urls TEXT NOT NULL DEFAULT '',
            stake_amount INTEGER NOT NULL,
            status TEXT NOT NULL,
            verdict TEXT NOT NULL DEFAULT '',
            reasoning TEXT NOT NULL DEFAULT '',
            confidence_score INTEGER NOT NULL DEFAULT 0,
            plaintiff_distribution INTEGER NOT NULL DEFAULT 0,
            defendant_distribution INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS evidence (
            evidence_id INTEGER PRIMARY KEY,
            dispute_id INTEGER NOT NULL,
            submitted_by TEXT NOT NULL,
            evidence_type TEXT NOT NULL,
            content TEXT NOT NULL,
            credibility_score INTEGER NOT NULL DEFAULT 0,
            submitted_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS counters (
            name TEXT PRIMARY KEY,
            value INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    for name in ["dispute", "evidence"] {
        sqlx::query("INSERT OR IGNORE INTO counters (name, value) VALUES (?, 0)")
            .bind(name)
            .execute(pool)
            .await?;
    }

    Ok(())
}

fn serialize_urls(urls: &[String]) -> String {
    urls.join("\n")
}

fn deserialize_urls(flat: &str) -> Vec<String> {
    if flat.is_empty() {
        return Vec::new();
    }
    flat.lines().map(str::to_string).collect()
}

type DisputeRow = (
    i64,
    String,
    String,
    String,
    String,
    i64,
    String,
    String,
    String,
    i64,
    i64,
    i64,
    DateTime<Utc>,
);

fn percent_from_row(value: i64, column: &str) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| crate::Error::Internal(format!("{column} out of range: {value}")))
}

fn dispute_from_row(row: DisputeRow) -> Result<Dispute> {
    let status = DisputeStatus::parse(&row.6)
        .ok_or_else(|| crate::Error::Internal(format!("unknown dispute status '{}'", row.6)))?;
    Ok(Dispute {
        dispute_id: row.0 as u64,
        plaintiff: Address::new(row.1),
        defendant: Address::new(row.2),
        case_description: row.3,
        evidence_urls: deserialize_urls(&row.4),
        stake_amount: row.5 as u64,
        status,
        verdict: row.7,
        reasoning: row.8,
        confidence_score: percent_from_row(row.9, "confidence_score")?,
        plaintiff_distribution: percent_from_row(row.10, "plaintiff_distribution")?,
        defendant_distribution: percent_from_row(row.11, "defendant_distribution")?,
        created_at: row.12,
    })
}

const SELECT_DISPUTE: &str = "SELECT dispute_id, plaintiff, defendant, case_description, \
     evidence_urls, stake_amount, status, verdict, reasoning, confidence_score, \
     plaintiff_distribution, defendant_distribution, created_at FROM disputes";

#[async_trait]
impl DisputeStore for SqliteStore {
    async fn insert_dispute(&self, mut dispute: Dispute) -> Result<Dispute> {
        let mut tx = self.pool.begin().await?;

        let next: i64 = sqlx::query_scalar("SELECT value FROM counters WHERE name = 'dispute'")
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query("UPDATE counters SET value = value + 1 WHERE name = 'dispute'")
            .execute(&mut *tx)
            .await?;

        dispute.dispute_id = next as u64;
        sqlx::query(
            r#"
            INSERT INTO disputes (dispute_id, plaintiff, defendant, case_description,
                evidence_urls, stake_amount, status, verdict, reasoning, confidence_score,
                plaintiff_distribution, defendant_distribution, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(next)
        .bind(dispute.plaintiff.as_str())
        .bind(dispute.defendant.as_str())
        .bind(&dispute.case_description)
        .bind(serialize_urls(&dispute.evidence_urls))
        .bind(dispute.stake_amount as i64)
        .bind(dispute.status.as_str())
        .bind(&dispute.verdict)
        .bind(&dispute.reasoning)
        .bind(dispute.confidence_score as i64)
        .bind(dispute.plaintiff_distribution as i64)
        .bind(dispute.defendant_distribution as i64)
        .bind(dispute.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(dispute)
    }

    async fn get_dispute(&self, dispute_id: u64) -> Result<Option<Dispute>> {
        let row: Option<DisputeRow> =
            sqlx::query_as(&format!("{SELECT_DISPUTE} WHERE dispute_id = ?"))
                .bind(dispute_id as i64)
                .fetch_optional(&self.pool)
                .await?;
        row.map(dispute_from_row).transpose()
    }

    async fn update_dispute(&self, dispute: &Dispute) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE disputes SET status = ?, verdict = ?, reasoning = ?,
                confidence_score = ?, plaintiff_distribution = ?, defendant_distribution = ?
            WHERE dispute_id = ?
            "#,
        )
        .bind(dispute.status.as_str())
        .bind(&dispute.verdict)
        .bind(&dispute.reasoning)
        .bind(dispute.confidence_score as i64)
        .bind(dispute.plaintiff_distribution as i64)
        .bind(dispute.defendant_distribution as i64)
        .bind(dispute.dispute_id as i64)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_evidence(&self, mut evidence: Evidence) -> Result<Evidence> {
        let mut tx = self.pool.begin().await?;

        let next: i64 = sqlx::query_scalar("SELECT value FROM counters WHERE name = 'evidence'")
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query("UPDATE counters SET value = value + 1 WHERE name = 'evidence'")
            .execute(&mut *tx)
            .await?;

        evidence.evidence_id = next as u64;
        sqlx::query(
            r#"
            INSERT INTO evidence (evidence_id, dispute_id, submitted_by, evidence_type,
                content, credibility_score, submitted_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(next)
        .bind(evidence.dispute_id as i64)
        .bind(evidence.submitted_by.as_str())
        .bind(&evidence.evidence_type)
        .bind(&evidence.content)
        .bind(evidence.credibility_score as i64)
        .bind(evidence.submitted_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(evidence)
    }

    async fn evidence_for_dispute(&self, dispute_id: u64) -> Result<Vec<Evidence>> {
        let rows: Vec<(i64, i64, String, String, String, i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT evidence_id, dispute_id, submitted_by, evidence_type, content, \
             credibility_score, submitted_at FROM evidence WHERE dispute_id = ? \
             ORDER BY evidence_id",
        )
        .bind(dispute_id as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(Evidence {
                    evidence_id: row.0 as u64,
                    dispute_id: row.1 as u64,
                    submitted_by: Address::new(row.2),
                    evidence_type: row.3,
                    content: row.4,
                    credibility_score: percent_from_row(row.5, "credibility_score")?,
                    submitted_at: row.6,
                })
            })
            .collect()
    }

    async fn all_disputes(&self) -> Result<Vec<DisputeSummary>> {
        let rows: Vec<(i64, String, String, String, String)> = sqlx::query_as(
            "SELECT dispute_id, plaintiff, defendant, status, verdict FROM disputes \
             ORDER BY dispute_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let status = DisputeStatus::parse(&row.3).ok_or_else(|| {
                    crate::Error::Internal(format!("unknown dispute status '{}'", row.3))
                })?;
                Ok(DisputeSummary {
                    dispute_id: row.0 as u64,
                    plaintiff: Address::new(row.1),
                    defendant: Address::new(row.2),
                    status,
                    verdict: row.4,
                })
            })
            .collect()
    }

    async fn dispute_count(&self) -> Result<u64> {
        let value: i64 = sqlx::query_scalar("SELECT value FROM counters WHERE name = 'dispute'")
            .fetch_one(&self.pool)
            .await?;
        Ok(value as u64)
    }

    async fn evidence_count(&self) -> Result<u64> {
        let value: i64 = sqlx::query_scalar("SELECT value FROM counters WHERE name = 'evidence'")
            .fetch_one(&self.pool)
            .await?;
        Ok(value as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("tribunal.db")).await.unwrap();
        (dir, store)
    }

    fn sample_dispute() -> Dispute {
        Dispute {
            dispute_id: 0,
            plaintiff: Address::new("0xplaintiff"),
            defendant: Address::new("0xdefendant"),
            case_description: "a dispute over an undelivered shipment of goods".repeat(2),
            evidence_urls: vec![
                "https://a.example/invoice".to_string(),
                "https://b.example/tracking".to_string(),
            ],
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

    #[tokio::test]
    async fn dispute_round_trips_with_url_list() {
        let (_dir, store) = temp_store().await;
        let stored = store.insert_dispute(sample_dispute()).await.unwrap();
        assert_eq!(stored.dispute_id, 0);

        let loaded = store.get_dispute(0).await.unwrap().unwrap();
        assert_eq!(loaded.evidence_urls, stored.evidence_urls);
        assert_eq!(loaded.status, DisputeStatus::EvidenceGathering);
        assert_eq!(loaded.stake_amount, 1000);
    }

    #[tokio::test]
    async fn counters_advance_with_each_insert() {
        let (_dir, store) = temp_store().await;
        for expected in 0..3u64 {
            let stored = store.insert_dispute(sample_dispute()).await.unwrap();
            assert_eq!(stored.dispute_id, expected);
        }
        assert_eq!(store.dispute_count().await.unwrap(), 3);
        assert_eq!(store.evidence_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_persists_resolution_fields() {
        let (_dir, store) = temp_store().await;
        let mut dispute = store.insert_dispute(sample_dispute()).await.unwrap();
        dispute.status = DisputeStatus::Resolved;
        dispute.verdict = "plaintiff_wins".to_string();
        dispute.confidence_score = 85;
        dispute.plaintiff_distribution = 70;
        dispute.defendant_distribution = 30;
        store.update_dispute(&dispute).await.unwrap();

        let loaded = store.get_dispute(dispute.dispute_id).await.unwrap().unwrap();
        assert_eq!(loaded.status, DisputeStatus::Resolved);
        assert_eq!(loaded.verdict, "plaintiff_wins");
        assert_eq!(loaded.confidence_score, 85);
        assert_eq!(loaded.plaintiff_distribution, 70);
        assert_eq!(loaded.defendant_distribution, 30);
    }

    #[tokio::test]
    async fn out_of_range_row_value_is_an_error_not_a_truncation() {
        let (_dir, store) = temp_store().await;
        let stored = store.insert_dispute(sample_dispute()).await.unwrap();

        sqlx::query("UPDATE disputes SET confidence_score = 300 WHERE dispute_id = ?")
            .bind(stored.dispute_id as i64)
            .execute(store.pool())
            .await
            .unwrap();

        let result = store.get_dispute(stored.dispute_id).await;
        assert!(matches!(result, Err(crate::Error::Internal(_))));
    }

    #[tokio::test]
    async fn empty_url_list_round_trips() {
        let (_dir, store) = temp_store().await;
        let mut dispute = sample_dispute();
        dispute.evidence_urls = Vec::new();
        let stored = store.insert_dispute(dispute).await.unwrap();
        let loaded = store.get_dispute(stored.dispute_id).await.unwrap().unwrap();
        assert!(loaded.evidence_urls.is_empty());
    }
}
