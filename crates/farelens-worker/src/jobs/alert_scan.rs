//! The alert scan cycle.
//!
//! For every user with alerting on: curate their feed, run each deal
//! through the admission chain, dispatch the admitted ones, and append
//! them to history. A failure on one user or one deal is logged and
//! skipped; it never aborts the rest of the cycle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use farelens_core::result::AppResult;
use farelens_database::repositories::{AlertHistoryRepository, ProfileRepository};
use farelens_engine::dispatch::AlertDispatcher;
use farelens_engine::{AdmissionController, FeedService};
use farelens_entity::alert::{AdmissionDecision, AlertRecord};

use crate::executor::JobHandler;
use crate::jobs::ALERT_SCAN;

/// Periodic scan evaluating fresh deals against every alertable user.
#[derive(Debug)]
pub struct AlertScanJob {
    profiles: Arc<ProfileRepository>,
    feed: Arc<FeedService>,
    admission: Arc<AdmissionController>,
    dispatcher: Arc<dyn AlertDispatcher>,
    history: Arc<AlertHistoryRepository>,
}

impl AlertScanJob {
    /// Create the alert scan job.
    pub fn new(
        profiles: Arc<ProfileRepository>,
        feed: Arc<FeedService>,
        admission: Arc<AdmissionController>,
        dispatcher: Arc<dyn AlertDispatcher>,
        history: Arc<AlertHistoryRepository>,
    ) -> Self {
        Self {
            profiles,
            feed,
            admission,
            dispatcher,
            history,
        }
    }
}

#[async_trait]
impl JobHandler for AlertScanJob {
    fn name(&self) -> &str {
        ALERT_SCAN
    }

    async fn run(&self) -> AppResult<Value> {
        let users = self.profiles.list_alert_candidates().await?;
        let mut sent = 0u64;
        let mut denied = 0u64;

        for user_id in &users {
            let profile = match self.profiles.find_by_user_id(*user_id).await {
                Ok(Some(profile)) => profile,
                Ok(None) => continue,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "Skipping user: profile load failed");
                    continue;
                }
            };
            if let Err(e) = profile.validate() {
                warn!(user_id = %user_id, error = %e, "Skipping user: invalid profile");
                continue;
            }

            let feed = match self.feed.curated_feed(&profile, None).await {
                Ok(feed) => feed,
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "Skipping user: feed failed");
                    continue;
                }
            };

            for ranked in feed {
                let now = Utc::now();
                match self.admission.evaluate(&profile, &ranked.deal, now).await {
                    Ok(AdmissionDecision::Allow) => {
                        sent += 1;
                        if let Err(e) = self.dispatcher.dispatch(profile.user_id, &ranked.deal).await
                        {
                            warn!(
                                user_id = %user_id,
                                deal_id = %ranked.deal.id,
                                error = %e,
                                "Alert dispatch failed"
                            );
                        }
                        let record = AlertRecord::from_deal(profile.user_id, &ranked.deal, now);
                        if let Err(e) = self.history.insert(&record).await {
                            warn!(
                                user_id = %user_id,
                                deal_id = %ranked.deal.id,
                                error = %e,
                                "Failed to record alert history"
                            );
                        }
                    }
                    Ok(AdmissionDecision::Deny { reason }) => {
                        denied += 1;
                        debug!(
                            user_id = %user_id,
                            deal_id = %ranked.deal.id,
                            reason = %reason,
                            "Alert suppressed"
                        );
                    }
                    Err(e) => {
                        warn!(
                            user_id = %user_id,
                            deal_id = %ranked.deal.id,
                            error = %e,
                            "Admission evaluation failed, skipping deal"
                        );
                    }
                }
            }
        }

        Ok(serde_json::json!({
            "users": users.len(),
            "sent": sent,
            "denied": denied,
        }))
    }
}
