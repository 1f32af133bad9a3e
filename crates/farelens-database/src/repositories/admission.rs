//! Postgres-backed admission state store.
//!
//! The conditional counter increment and the duplicate record write are
//! single statements so they stay atomic without explicit transactions,
//! and remain correct when several processes evaluate alerts at once.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use farelens_core::error::{AppError, ErrorKind};
use farelens_core::result::AppResult;
use farelens_core::traits::admission::AdmissionStore;
use farelens_core::types::id::{DealId, UserId};

/// Repository implementing [`AdmissionStore`] over the `alert_counters`
/// and `alert_dedup` tables.
#[derive(Debug, Clone)]
pub struct AdmissionRepository {
    pool: PgPool,
}

impl AdmissionRepository {
    /// Create a new admission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write error, surfacing Postgres serialization failures
/// (SQLSTATE 40001) and deadlocks (40P01) as conflicts so the
/// admission controller retries them instead of failing the
/// evaluation.
fn map_write_error(message: &str, e: sqlx::Error) -> AppError {
    let contended = matches!(
        &e,
        sqlx::Error::Database(db)
            if matches!(db.code().as_deref(), Some("40001") | Some("40P01"))
    );
    if contended {
        AppError::with_source(ErrorKind::Conflict, message, e)
    } else {
        AppError::with_source(ErrorKind::Database, message, e)
    }
}

#[async_trait]
impl AdmissionStore for AdmissionRepository {
    async fn sent_count(&self, user: UserId, date: NaiveDate) -> AppResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT sent_count FROM alert_counters WHERE user_id = $1 AND local_date = $2",
        )
        .bind(user)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read alert counter", e)
        })?;
        Ok(count.unwrap_or(0))
    }

    async fn increment_if_below(
        &self,
        user: UserId,
        date: NaiveDate,
        max: i64,
    ) -> AppResult<bool> {
        // A zero cap admits nothing; the upsert below would still insert
        // the first row.
        if max <= 0 {
            return Ok(false);
        }
        let result = sqlx::query(
            "INSERT INTO alert_counters (user_id, local_date, sent_count) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (user_id, local_date) DO UPDATE SET \
                sent_count = alert_counters.sent_count + 1, \
                updated_at = NOW() \
             WHERE alert_counters.sent_count < $3",
        )
        .bind(user)
        .bind(date)
        .bind(max)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to increment alert counter", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn last_alert_at(&self, user: UserId, deal: DealId) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar(
            "SELECT sent_at FROM alert_dedup WHERE user_id = $1 AND deal_id = $2",
        )
        .bind(user)
        .bind(deal)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read duplicate record", e)
        })
    }

    async fn record_alert(
        &self,
        user: UserId,
        deal: DealId,
        sent_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO alert_dedup (user_id, deal_id, sent_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, deal_id) DO UPDATE SET sent_at = EXCLUDED.sent_at",
        )
        .bind(user)
        .bind(deal)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to write duplicate record", e))?;
        Ok(())
    }

    async fn sweep_duplicates_before(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM alert_dedup WHERE sent_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to sweep duplicate records", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn purge_counters_before(&self, before: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM alert_counters WHERE local_date < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge alert counters", e)
            })?;
        Ok(result.rows_affected())
    }
}
