//! Admission state store trait: daily send counters and duplicate
//! suppression records.
//!
//! Both operations that mutate state are required to be atomic at the
//! storage level: the counter increment is conditional on the current
//! count and the duplicate record write is a check-or-set. The admission
//! controller additionally serializes evaluations per user, but the
//! store must not rely on that for correctness across processes.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::result::AppResult;
use crate::types::id::{DealId, UserId};

/// Backing store for admission-control state.
///
/// Keys are scoped per user: the daily counter by `(user, local date)`
/// and the duplicate record by `(user, deal)`. The counter "resets"
/// naturally because the key includes the date; no reset job is needed
/// as long as callers pass the user's current local date.
#[async_trait]
pub trait AdmissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Number of alerts already sent to `user` on `date` (their local
    /// calendar date). Missing rows read as zero.
    async fn sent_count(&self, user: UserId, date: NaiveDate) -> AppResult<i64>;

    /// Atomically increment the daily counter for `(user, date)` if the
    /// current count is below `max`. Returns `true` if the increment was
    /// applied, `false` if the cap was already reached.
    async fn increment_if_below(&self, user: UserId, date: NaiveDate, max: i64)
    -> AppResult<bool>;

    /// The instant an alert was last sent for `(user, deal)`, or `None`
    /// if no record exists. Expired records may still be returned;
    /// window arithmetic is the caller's concern.
    async fn last_alert_at(&self, user: UserId, deal: DealId) -> AppResult<Option<DateTime<Utc>>>;

    /// Write or refresh the duplicate-suppression record for
    /// `(user, deal)` with `sent_at`.
    async fn record_alert(&self, user: UserId, deal: DealId, sent_at: DateTime<Utc>)
    -> AppResult<()>;

    /// Remove duplicate records with a timestamp older than `before`.
    /// Returns the number of records removed.
    async fn sweep_duplicates_before(&self, before: DateTime<Utc>) -> AppResult<u64>;

    /// Remove daily counters for dates older than `before`.
    /// Returns the number of counters removed.
    async fn purge_counters_before(&self, before: NaiveDate) -> AppResult<u64>;
}
