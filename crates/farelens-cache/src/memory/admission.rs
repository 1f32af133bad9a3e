//! In-memory admission state store.
//!
//! Used when the application runs without a database (local development
//! and tests). Atomicity comes from dashmap's per-entry locking: the
//! conditional increment holds the entry guard across the check and the
//! write.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;

use farelens_core::result::AppResult;
use farelens_core::traits::admission::AdmissionStore;
use farelens_core::types::id::{DealId, UserId};

/// Memory-backed [`AdmissionStore`].
#[derive(Debug, Default)]
pub struct MemoryAdmissionStore {
    /// Daily alert counters keyed by user and local calendar date.
    counters: DashMap<(UserId, NaiveDate), i64>,
    /// Duplicate-suppression records keyed by user and deal.
    dedup: DashMap<(UserId, DealId), DateTime<Utc>>,
}

impl MemoryAdmissionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdmissionStore for MemoryAdmissionStore {
    async fn sent_count(&self, user: UserId, date: NaiveDate) -> AppResult<i64> {
        Ok(self.counters.get(&(user, date)).map(|v| *v).unwrap_or(0))
    }

    async fn increment_if_below(
        &self,
        user: UserId,
        date: NaiveDate,
        max: i64,
    ) -> AppResult<bool> {
        let mut entry = self.counters.entry((user, date)).or_insert(0);
        if *entry >= max {
            return Ok(false);
        }
        *entry += 1;
        Ok(true)
    }

    async fn last_alert_at(&self, user: UserId, deal: DealId) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.dedup.get(&(user, deal)).map(|v| *v))
    }

    async fn record_alert(
        &self,
        user: UserId,
        deal: DealId,
        sent_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.dedup.insert((user, deal), sent_at);
        Ok(())
    }

    async fn sweep_duplicates_before(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let initial = self.dedup.len();
        self.dedup.retain(|_, sent_at| *sent_at >= before);
        Ok((initial - self.dedup.len()) as u64)
    }

    async fn purge_counters_before(&self, before: NaiveDate) -> AppResult<u64> {
        let initial = self.counters.len();
        self.counters.retain(|(_, date), _| *date >= before);
        Ok((initial - self.counters.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[tokio::test]
    async fn test_counter_starts_at_zero() {
        let store = MemoryAdmissionStore::new();
        let count = store.sent_count(UserId::new(), today()).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_increment_stops_at_max() {
        let store = MemoryAdmissionStore::new();
        let user = UserId::new();
        for _ in 0..3 {
            assert!(store.increment_if_below(user, today(), 3).await.unwrap());
        }
        assert!(!store.increment_if_below(user, today(), 3).await.unwrap());
        assert_eq!(store.sent_count(user, today()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_counters_isolated_by_date() {
        let store = MemoryAdmissionStore::new();
        let user = UserId::new();
        let yesterday = today() - Duration::days(1);
        assert!(store.increment_if_below(user, yesterday, 1).await.unwrap());
        assert_eq!(store.sent_count(user, today()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dedup_record_and_sweep() {
        let store = MemoryAdmissionStore::new();
        let (user, deal) = (UserId::new(), DealId::new());
        let sent = Utc::now() - Duration::hours(13);
        store.record_alert(user, deal, sent).await.unwrap();
        assert_eq!(store.last_alert_at(user, deal).await.unwrap(), Some(sent));

        let removed = store
            .sweep_duplicates_before(Utc::now() - Duration::hours(12))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.last_alert_at(user, deal).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_purge_old_counters() {
        let store = MemoryAdmissionStore::new();
        let user = UserId::new();
        let old = today() - Duration::days(10);
        store.increment_if_below(user, old, 5).await.unwrap();
        store.increment_if_below(user, today(), 5).await.unwrap();

        let removed = store
            .purge_counters_before(today() - Duration::days(7))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.sent_count(user, today()).await.unwrap(), 1);
    }
}
