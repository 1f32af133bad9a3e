//! Alert history repository implementation.

use sqlx::PgPool;

use farelens_core::error::{AppError, ErrorKind};
use farelens_core::result::AppResult;
use farelens_core::types::id::UserId;
use farelens_entity::alert::AlertRecord;

/// Repository for the delivered-alert history.
#[derive(Debug, Clone)]
pub struct AlertHistoryRepository {
    pool: PgPool,
}

impl AlertHistoryRepository {
    /// Create a new alert history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a delivered alert to history.
    pub async fn insert(&self, record: &AlertRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO alert_history \
                (id, user_id, deal_id, origin, destination, total_price, currency, \
                 quality_score, sent_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.deal_id)
        .bind(&record.origin)
        .bind(&record.destination)
        .bind(record.total_price)
        .bind(&record.currency)
        .bind(record.quality_score)
        .bind(record.sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert alert history", e)
        })?;
        Ok(())
    }

    /// Most recent alerts for a user, newest first.
    pub async fn find_recent_by_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> AppResult<Vec<AlertRecord>> {
        sqlx::query_as::<_, AlertRecord>(
            "SELECT id, user_id, deal_id, origin, destination, total_price, currency, \
                    quality_score, sent_at \
             FROM alert_history WHERE user_id = $1 \
             ORDER BY sent_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list alert history", e)
        })
    }
}
