//! Sweep of expired duplicate-suppression records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;

use farelens_core::result::AppResult;
use farelens_core::traits::admission::AdmissionStore;

use crate::executor::JobHandler;
use crate::jobs::DEDUP_SWEEP;

/// Removes duplicate records older than the suppression window.
#[derive(Debug)]
pub struct DedupSweepJob {
    store: Arc<dyn AdmissionStore>,
    window_hours: i64,
}

impl DedupSweepJob {
    /// Create the sweep job over the given store and window.
    pub fn new(store: Arc<dyn AdmissionStore>, window_hours: i64) -> Self {
        Self {
            store,
            window_hours,
        }
    }
}

#[async_trait]
impl JobHandler for DedupSweepJob {
    fn name(&self) -> &str {
        DEDUP_SWEEP
    }

    async fn run(&self) -> AppResult<Value> {
        let before = Utc::now() - Duration::hours(self.window_hours);
        let removed = self.store.sweep_duplicates_before(before).await?;
        Ok(serde_json::json!({ "removed": removed }))
    }
}
