//! Purge of stale daily alert counters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;

use farelens_core::result::AppResult;
use farelens_core::traits::admission::AdmissionStore;

use crate::executor::JobHandler;
use crate::jobs::COUNTER_PURGE;

/// Removes daily counters older than the retention window. Counters
/// reset by keying on the local date, so old rows are pure garbage.
#[derive(Debug)]
pub struct CounterPurgeJob {
    store: Arc<dyn AdmissionStore>,
    retention_days: i64,
}

impl CounterPurgeJob {
    /// Create the purge job with the given retention.
    pub fn new(store: Arc<dyn AdmissionStore>, retention_days: i64) -> Self {
        Self {
            store,
            retention_days,
        }
    }
}

#[async_trait]
impl JobHandler for CounterPurgeJob {
    fn name(&self) -> &str {
        COUNTER_PURGE
    }

    async fn run(&self) -> AppResult<Value> {
        let before = (Utc::now() - Duration::days(self.retention_days)).date_naive();
        let removed = self.store.purge_counters_before(before).await?;
        Ok(serde_json::json!({ "removed": removed }))
    }
}
