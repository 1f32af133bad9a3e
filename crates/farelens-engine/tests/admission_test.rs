//! Admission chain integration tests over the in-memory state store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures::future::join_all;

use farelens_cache::MemoryAdmissionStore;
use farelens_core::config::alerts::AlertsConfig;
use farelens_core::error::AppError;
use farelens_core::result::AppResult;
use farelens_core::traits::admission::AdmissionStore;
use farelens_core::types::id::{DealId, UserId, WatchlistId};
use farelens_engine::AdmissionController;
use farelens_entity::alert::{AdmissionDecision, DenyReason};
use farelens_entity::deal::Deal;
use farelens_entity::user::{
    AlertSettings, PreferredAirport, SubscriptionTier, UserPreferenceProfile,
};
use farelens_entity::watchlist::Watchlist;

fn make_deal(score: i32) -> Deal {
    let now = Utc::now();
    Deal {
        id: DealId::new(),
        origin: "LAX".to_string(),
        destination: "JFK".to_string(),
        departure_date: now + Duration::days(14),
        return_date: now + Duration::days(21),
        total_price: 420.0,
        currency: "USD".to_string(),
        quality_score: score,
        discount_percent: 35,
        normal_price: 646.0,
        created_at: now,
        expires_at: now + Duration::hours(24),
        airline: "Delta".to_string(),
        stops: 0,
        return_stops: Some(0),
        deep_link: "https://example.com/d".to_string(),
    }
}

fn make_profile(tier: SubscriptionTier) -> UserPreferenceProfile {
    UserPreferenceProfile {
        user_id: UserId::new(),
        tier,
        utc_offset_minutes: 0,
        preferred_airports: vec![PreferredAirport {
            iata: "LAX".to_string(),
            weight: 1.0,
        }],
        alerts: AlertSettings::default(),
        watchlists: vec![],
    }
}

fn controller() -> AdmissionController {
    AdmissionController::new(Arc::new(MemoryAdmissionStore::new()), AlertsConfig::default())
}

/// Store whose counter increment fails with a conflict a fixed number
/// of times before delegating, the way a contended Postgres row
/// surfaces serialization failures.
#[derive(Debug)]
struct ContendedStore {
    inner: MemoryAdmissionStore,
    conflicts_left: AtomicUsize,
}

impl ContendedStore {
    fn new(conflicts: usize) -> Self {
        Self {
            inner: MemoryAdmissionStore::new(),
            conflicts_left: AtomicUsize::new(conflicts),
        }
    }
}

#[async_trait]
impl AdmissionStore for ContendedStore {
    async fn sent_count(&self, user: UserId, date: NaiveDate) -> AppResult<i64> {
        self.inner.sent_count(user, date).await
    }

    async fn increment_if_below(
        &self,
        user: UserId,
        date: NaiveDate,
        max: i64,
    ) -> AppResult<bool> {
        if self
            .conflicts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AppError::conflict("Counter row contended"));
        }
        self.inner.increment_if_below(user, date, max).await
    }

    async fn last_alert_at(&self, user: UserId, deal: DealId) -> AppResult<Option<DateTime<Utc>>> {
        self.inner.last_alert_at(user, deal).await
    }

    async fn record_alert(
        &self,
        user: UserId,
        deal: DealId,
        sent_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.inner.record_alert(user, deal, sent_at).await
    }

    async fn sweep_duplicates_before(&self, before: DateTime<Utc>) -> AppResult<u64> {
        self.inner.sweep_duplicates_before(before).await
    }

    async fn purge_counters_before(&self, before: NaiveDate) -> AppResult<u64> {
        self.inner.purge_counters_before(before).await
    }
}

/// Noon UTC, offset 0: outside the default 22-7 quiet window.
fn daytime() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-14T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_cap_law_free_tier() {
    let controller = controller();
    let profile = make_profile(SubscriptionTier::Free);
    let now = daytime();

    for _ in 0..3 {
        let decision = controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
        assert_eq!(decision, AdmissionDecision::Allow);
    }
    // A high score buys nothing once the cap is hit.
    let decision = controller.evaluate(&profile, &make_deal(95), now).await.unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::CapReached));

    // And it stays denied for the rest of the local date.
    let later = now + Duration::hours(4);
    let decision = controller.evaluate(&profile, &make_deal(99), later).await.unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::CapReached));
}

#[tokio::test]
async fn test_cap_resets_with_local_date() {
    let controller = controller();
    let profile = make_profile(SubscriptionTier::Free);
    let now = daytime();

    for _ in 0..3 {
        controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
    }
    let next_day = now + Duration::days(1);
    let decision = controller.evaluate(&profile, &make_deal(90), next_day).await.unwrap();
    assert_eq!(decision, AdmissionDecision::Allow);
}

#[tokio::test]
async fn test_pro_cap_is_higher() {
    let controller = controller();
    let profile = make_profile(SubscriptionTier::Pro);
    let now = daytime();

    for _ in 0..6 {
        let decision = controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
        assert_eq!(decision, AdmissionDecision::Allow);
    }
    let decision = controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::CapReached));
}

#[tokio::test]
async fn test_duplicate_suppression_window() {
    let controller = controller();
    let profile = make_profile(SubscriptionTier::Free);
    let deal = make_deal(90);
    // 08:00 local keeps every evaluation below outside quiet hours.
    let t0 = DateTime::parse_from_rfc3339("2026-03-14T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    let first = controller.evaluate(&profile, &deal, t0).await.unwrap();
    assert_eq!(first, AdmissionDecision::Allow);

    let within = controller
        .evaluate(&profile, &deal, t0 + Duration::hours(11))
        .await
        .unwrap();
    assert_eq!(within, AdmissionDecision::deny(DenyReason::Duplicate));

    let after = controller
        .evaluate(&profile, &deal, t0 + Duration::hours(13))
        .await
        .unwrap();
    assert_eq!(after, AdmissionDecision::Allow);
}

#[tokio::test]
async fn test_quiet_hours_denial() {
    let controller = controller();
    let profile = make_profile(SubscriptionTier::Free);
    // 23:00 local with the default 22-7 window.
    let night = DateTime::parse_from_rfc3339("2026-03-14T23:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    let decision = controller.evaluate(&profile, &make_deal(99), night).await.unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::QuietHours));
}

#[tokio::test]
async fn test_quiet_hours_follow_user_offset() {
    let controller = controller();
    let mut profile = make_profile(SubscriptionTier::Free);
    profile.utc_offset_minutes = -480; // UTC-8

    // 07:00 UTC is 23:00 local the previous day: quiet.
    let now = DateTime::parse_from_rfc3339("2026-03-14T07:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let decision = controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::QuietHours));

    // 20:00 UTC is noon local: not quiet.
    let noon = DateTime::parse_from_rfc3339("2026-03-14T20:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let decision = controller.evaluate(&profile, &make_deal(90), noon).await.unwrap();
    assert_eq!(decision, AdmissionDecision::Allow);
}

#[tokio::test]
async fn test_invalid_offset_fails_closed() {
    let controller = controller();
    let mut profile = make_profile(SubscriptionTier::Free);
    profile.utc_offset_minutes = 10_000;

    let decision = controller
        .evaluate(&profile, &make_deal(90), daytime())
        .await
        .unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::QuietHours));
}

#[tokio::test]
async fn test_disabled_alerts_deny_first() {
    let controller = controller();
    let mut profile = make_profile(SubscriptionTier::Free);
    profile.alerts.enabled = false;

    let decision = controller
        .evaluate(&profile, &make_deal(90), daytime())
        .await
        .unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::Disabled));
}

#[tokio::test]
async fn test_watchlist_only_mode_requires_match() {
    let controller = controller();
    let mut profile = make_profile(SubscriptionTier::Pro);
    profile.alerts.watchlist_only_mode = true;
    let now = Utc::now();
    profile.watchlists = vec![Watchlist {
        id: WatchlistId::new(),
        user_id: profile.user_id,
        name: "SFO only".to_string(),
        origin: "SFO".to_string(),
        destination: None,
        date_range_start: None,
        date_range_end: None,
        max_price: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }];

    // Deal departs LAX; the only watchlist watches SFO.
    let decision = controller
        .evaluate(&profile, &make_deal(90), daytime())
        .await
        .unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::NotWatched));

    profile.watchlists[0].origin = "LAX".to_string();
    let decision = controller
        .evaluate(&profile, &make_deal(90), daytime())
        .await
        .unwrap();
    assert_eq!(decision, AdmissionDecision::Allow);
}

#[tokio::test]
async fn test_concurrent_evaluations_respect_cap() {
    let controller = Arc::new(controller());
    let profile = Arc::new(make_profile(SubscriptionTier::Free));
    let now = daytime();

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let controller = Arc::clone(&controller);
            let profile = Arc::clone(&profile);
            tokio::spawn(async move {
                controller.evaluate(&profile, &make_deal(90), now).await.unwrap()
            })
        })
        .collect();

    let decisions: Vec<AdmissionDecision> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let allows = decisions.iter().filter(|d| d.is_allowed()).count();
    assert_eq!(allows, 3);
    assert!(decisions
        .iter()
        .filter(|d| !d.is_allowed())
        .all(|d| *d == AdmissionDecision::deny(DenyReason::CapReached)));
}

#[tokio::test]
async fn test_store_conflict_retried_once_then_allows() {
    let store = Arc::new(ContendedStore::new(1));
    let controller = AdmissionController::new(store.clone(), AlertsConfig::default());
    let profile = make_profile(SubscriptionTier::Free);
    let now = daytime();

    let decision = controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
    assert_eq!(decision, AdmissionDecision::Allow);

    // The retry went through the real increment exactly once.
    let count = store.sent_count(profile.user_id, now.date_naive()).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_repeated_store_conflict_denies_conservatively() {
    let store = Arc::new(ContendedStore::new(2));
    let controller = AdmissionController::new(store.clone(), AlertsConfig::default());
    let profile = make_profile(SubscriptionTier::Free);
    let now = daytime();

    let decision = controller.evaluate(&profile, &make_deal(90), now).await.unwrap();
    assert_eq!(decision, AdmissionDecision::deny(DenyReason::CapReached));

    // Nothing was sent, so no side effects were recorded.
    let count = store.sent_count(profile.user_id, now.date_naive()).await.unwrap();
    assert_eq!(count, 0);
}
