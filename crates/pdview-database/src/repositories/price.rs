//! Price ledger repository implementation.
//!
//! The ledger is append-only: records are never updated or deleted, and id
//! assignment is serialized by SQLite's single-writer discipline, so
//! concurrent appends always receive distinct, strictly increasing ids.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::{info, warn};

use pdview_core::error::{AppError, ErrorKind};
use pdview_core::result::AppResult;
use pdview_entity::price::PriceRecord;

/// Maximum number of records a history query may return.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Prices written by [`PriceRepository::seed_if_empty`] on first startup.
const SEED_ETANOL: f64 = 3.99;
const SEED_GASOLINA: f64 = 5.99;

/// Repository for the append-only price ledger.
#[derive(Debug, Clone)]
pub struct PriceRepository {
    pool: SqlitePool,
}

impl PriceRepository {
    /// Create a new price repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Return the most recently appended record.
    ///
    /// Ordered by timestamp descending with the id as tiebreak, so when
    /// two appends land within clock resolution the record with the
    /// greatest id wins.
    pub async fn latest(&self) -> AppResult<PriceRecord> {
        sqlx::query_as::<_, PriceRecord>(
            "SELECT id, etanol, gasolina, timestamp FROM prices \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch latest price", e))?
        .ok_or_else(|| AppError::not_found("No price has been recorded"))
    }

    /// Append a new price record and return it.
    ///
    /// Both values must be strictly positive. The timestamp is assigned
    /// here, never taken from the client.
    pub async fn append(&self, etanol: f64, gasolina: f64) -> AppResult<PriceRecord> {
        if etanol <= 0.0 || gasolina <= 0.0 {
            return Err(AppError::validation("Prices must be greater than zero"));
        }

        let record = sqlx::query_as::<_, PriceRecord>(
            "INSERT INTO prices (etanol, gasolina, timestamp) VALUES (?, ?, ?) \
             RETURNING id, etanol, gasolina, timestamp",
        )
        .bind(etanol)
        .bind(gasolina)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append price", e))?;

        info!(
            id = record.id,
            etanol = record.etanol,
            gasolina = record.gasolina,
            "Price appended"
        );
        Ok(record)
    }

    /// Return up to `limit` most recent records, newest first.
    ///
    /// `limit` is clamped to [`MAX_HISTORY_LIMIT`]. A row that fails to
    /// decode is skipped rather than aborting the whole query.
    pub async fn history(&self, limit: u32) -> AppResult<Vec<PriceRecord>> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);

        let rows = sqlx::query(
            "SELECT id, etanol, gasolina, timestamp FROM prices \
             ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch price history", e)
        })?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            match PriceRecord::from_row(row) {
                Ok(record) => records.push(record),
                Err(e) => warn!(error = %e, "Skipping undecodable price row"),
            }
        }
        Ok(records)
    }

    /// Insert the bootstrap record when the ledger is empty.
    ///
    /// Guarantees `latest` never runs against an empty store in normal
    /// operation.
    pub async fn seed_if_empty(&self) -> AppResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prices")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count prices", e))?;

        if count == 0 {
            let record = self.append(SEED_ETANOL, SEED_GASOLINA).await?;
            info!(
                id = record.id,
                etanol = SEED_ETANOL,
                gasolina = SEED_GASOLINA,
                "Seeded initial prices"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;
    use crate::migration::run_migrations;
    use pdview_core::config::database::DatabaseConfig;

    async fn test_repo(dir: &tempfile::TempDir) -> PriceRepository {
        let config = DatabaseConfig {
            path: dir.path().join("prices.db").to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        };
        let pool = DatabasePool::connect(&config).await.unwrap().into_pool();
        run_migrations(&pool).await.unwrap();
        PriceRepository::new(pool)
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        repo.seed_if_empty().await.unwrap();
        repo.seed_if_empty().await.unwrap();

        let history = repo.history(100).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].etanol, 3.99);
        assert_eq!(history[0].gasolina, 5.99);
    }

    #[tokio::test]
    async fn test_latest_follows_append() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;
        repo.seed_if_empty().await.unwrap();

        let appended = repo.append(4.19, 6.09).await.unwrap();
        let latest = repo.latest().await.unwrap();

        assert_eq!(latest.id, appended.id);
        assert_eq!(latest.etanol, 4.19);
        assert_eq!(latest.gasolina, 6.09);
    }

    #[tokio::test]
    async fn test_latest_on_empty_store_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        let err = repo.latest().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_append_rejects_non_positive_prices() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        for (etanol, gasolina) in [(0.0, 5.0), (5.0, -1.0), (-2.0, -2.0)] {
            let err = repo.append(etanol, gasolina).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }

        // No record may survive a failed append.
        assert!(repo.history(100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_capped_and_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        for i in 1..=120 {
            repo.append(i as f64, i as f64 + 1.0).await.unwrap();
        }

        let history = repo.history(1000).await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY_LIMIT as usize);
        assert_eq!(history[0].etanol, 120.0);
        for pair in history.windows(2) {
            assert!(pair[0].id > pair[1].id);
        }

        let short = repo.history(5).await.unwrap();
        assert_eq!(short.len(), 5);
    }

    #[tokio::test]
    async fn test_concurrent_appends_get_distinct_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = test_repo(&dir).await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.append(1.0 + i as f64, 2.0 + i as f64).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16, "every append must receive a distinct id");

        let latest = repo.latest().await.unwrap();
        assert_eq!(latest.id, *ids.last().unwrap());
    }
}
