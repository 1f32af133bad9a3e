//! Alert admission control.
//!
//! A fixed policy chain evaluated per (user, deal, instant):
//! enabled, preference-only, duplicate, quiet hours, daily cap, then
//! admit with side effects. The first failing check wins and its
//! reason is reported.
//!
//! Evaluations for one user are serialized through a per-user async
//! mutex so the cap check and the counter increment act as one unit;
//! different users never contend. The backing store's conditional
//! increment is itself atomic, which keeps the cap safe across
//! processes as well.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use farelens_core::config::alerts::AlertsConfig;
use farelens_core::error::ErrorKind;
use farelens_core::result::AppResult;
use farelens_core::traits::admission::AdmissionStore;
use farelens_core::types::id::UserId;
use farelens_entity::alert::{AdmissionDecision, DenyReason};
use farelens_entity::deal::Deal;
use farelens_entity::user::UserPreferenceProfile;

/// Largest UTC offset considered sane, in minutes (UTC+14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Evaluates the alert admission chain for candidate deals.
#[derive(Debug)]
pub struct AdmissionController {
    store: Arc<dyn AdmissionStore>,
    config: AlertsConfig,
    /// Per-user serialization points, created lazily.
    user_locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl AdmissionController {
    /// Create a controller over the given state store.
    pub fn new(store: Arc<dyn AdmissionStore>, config: AlertsConfig) -> Self {
        Self {
            store,
            config,
            user_locks: DashMap::new(),
        }
    }

    /// Evaluate the full admission chain for one candidate.
    ///
    /// On ALLOW the daily counter has been incremented and the
    /// duplicate record written; the caller may hand the alert to the
    /// dispatcher. A storage conflict is retried once and then denied
    /// conservatively rather than risking a double send.
    pub async fn evaluate(
        &self,
        profile: &UserPreferenceProfile,
        deal: &Deal,
        now: DateTime<Utc>,
    ) -> AppResult<AdmissionDecision> {
        let lock = self
            .user_locks
            .entry(profile.user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        match self.run_chain(profile, deal, now).await {
            Ok(decision) => Ok(decision),
            Err(err) if err.kind == ErrorKind::Conflict => {
                debug!(user_id = %profile.user_id, "Admission conflict, retrying once");
                match self.run_chain(profile, deal, now).await {
                    Ok(decision) => Ok(decision),
                    Err(err) if err.kind == ErrorKind::Conflict => {
                        warn!(
                            user_id = %profile.user_id,
                            deal_id = %deal.id,
                            "Admission retry also conflicted, denying conservatively"
                        );
                        Ok(AdmissionDecision::deny(DenyReason::CapReached))
                    }
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn run_chain(
        &self,
        profile: &UserPreferenceProfile,
        deal: &Deal,
        now: DateTime<Utc>,
    ) -> AppResult<AdmissionDecision> {
        // 1. Master switch.
        if !profile.alerts.enabled {
            return Ok(AdmissionDecision::deny(DenyReason::Disabled));
        }

        // 2. Preference-only delivery (pro feature).
        if profile.alerts.watchlist_only_mode
            && profile.tier.allows_watchlist_only()
            && !profile.active_watchlists().any(|w| w.matches(deal))
        {
            return Ok(AdmissionDecision::deny(DenyReason::NotWatched));
        }

        // 3. Duplicate suppression.
        if let Some(last) = self.store.last_alert_at(profile.user_id, deal.id).await? {
            if now - last < Duration::hours(self.config.dedup_window_hours) {
                return Ok(AdmissionDecision::deny(DenyReason::Duplicate));
            }
        }

        // 4. Quiet hours in the user's local time. An unresolvable
        // local clock fails closed: deny rather than wake a user.
        let Some(local) = local_time(now, profile.utc_offset_minutes) else {
            warn!(
                user_id = %profile.user_id,
                offset = profile.utc_offset_minutes,
                "Cannot resolve user local time, treating as quiet hours"
            );
            return Ok(AdmissionDecision::deny(DenyReason::QuietHours));
        };
        let hour = local.hour() as i32;
        if profile.alerts.is_quiet_hour(hour) {
            return Ok(AdmissionDecision::deny(DenyReason::QuietHours));
        }

        // 5 + 6. Daily cap and admit. The conditional increment is the
        // cap check and the side effect in one atomic statement.
        let cap = if profile.tier.is_pro() {
            self.config.pro_daily_cap
        } else {
            self.config.free_daily_cap
        };
        let local_date = local.date_naive();
        if !self
            .store
            .increment_if_below(profile.user_id, local_date, cap)
            .await?
        {
            return Ok(AdmissionDecision::deny(DenyReason::CapReached));
        }

        self.store.record_alert(profile.user_id, deal.id, now).await?;
        Ok(AdmissionDecision::Allow)
    }
}

/// Convert an instant into the user's local time, or `None` if the
/// stored offset is out of range.
fn local_time(now: DateTime<Utc>, offset_minutes: i32) -> Option<DateTime<FixedOffset>> {
    if offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(offset_minutes * 60).map(|offset| now.with_timezone(&offset))
}
