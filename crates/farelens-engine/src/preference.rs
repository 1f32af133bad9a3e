//! Preference resolution: per-deal boost and weight lookups.

use farelens_entity::deal::Deal;
use farelens_entity::user::UserPreferenceProfile;

/// Resolves a user's preference signals for a single deal.
#[derive(Debug, Clone)]
pub struct PreferenceResolver {
    /// Multiplier bonus for a watchlist match.
    watchlist_boost: f64,
}

impl PreferenceResolver {
    /// Create a resolver with the configured watchlist boost.
    pub fn new(watchlist_boost: f64) -> Self {
        Self { watchlist_boost }
    }

    /// Weight of the deal's origin among the user's preferred airports,
    /// or zero if the origin is not preferred.
    pub fn airport_weight(&self, profile: &UserPreferenceProfile, origin: &str) -> f64 {
        profile
            .preferred_airports
            .iter()
            .find(|a| a.iata.eq_ignore_ascii_case(origin))
            .map(|a| a.weight)
            .unwrap_or(0.0)
    }

    /// The watchlist boost for this deal: the configured constant if any
    /// active watchlist matches, otherwise zero. Several matching
    /// watchlists contribute the boost at most once, so the score stays
    /// bounded no matter how many watchlists a user creates.
    pub fn watchlist_boost(&self, profile: &UserPreferenceProfile, deal: &Deal) -> f64 {
        if profile.active_watchlists().any(|w| w.matches(deal)) {
            self.watchlist_boost
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use farelens_core::types::id::{DealId, UserId, WatchlistId};
    use farelens_entity::user::{AlertSettings, PreferredAirport, SubscriptionTier};
    use farelens_entity::watchlist::Watchlist;

    fn make_deal(origin: &str, destination: &str) -> Deal {
        let now = Utc::now();
        Deal {
            id: DealId::new(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: now + Duration::days(14),
            return_date: now + Duration::days(21),
            total_price: 420.0,
            currency: "USD".to_string(),
            quality_score: 85,
            discount_percent: 30,
            normal_price: 600.0,
            created_at: now,
            expires_at: now + Duration::hours(12),
            airline: "Delta".to_string(),
            stops: 0,
            return_stops: Some(0),
            deep_link: "https://example.com/d".to_string(),
        }
    }

    fn make_watchlist(user_id: UserId, origin: &str, active: bool) -> Watchlist {
        let now = Utc::now();
        Watchlist {
            id: WatchlistId::new(),
            user_id,
            name: format!("{origin} watch"),
            origin: origin.to_string(),
            destination: None,
            date_range_start: None,
            date_range_end: None,
            max_price: None,
            is_active: active,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_profile() -> UserPreferenceProfile {
        UserPreferenceProfile {
            user_id: UserId::new(),
            tier: SubscriptionTier::Free,
            utc_offset_minutes: 0,
            preferred_airports: vec![PreferredAirport {
                iata: "LAX".to_string(),
                weight: 0.5,
            }],
            alerts: AlertSettings::default(),
            watchlists: vec![],
        }
    }

    #[test]
    fn test_airport_weight_case_insensitive() {
        let resolver = PreferenceResolver::new(0.5);
        let profile = make_profile();
        assert_eq!(resolver.airport_weight(&profile, "lax"), 0.5);
        assert_eq!(resolver.airport_weight(&profile, "SFO"), 0.0);
    }

    #[test]
    fn test_boost_applies_once_across_matches() {
        let resolver = PreferenceResolver::new(0.5);
        let mut profile = make_profile();
        profile.watchlists = vec![
            make_watchlist(profile.user_id, "LAX", true),
            make_watchlist(profile.user_id, "LAX", true),
        ];
        let deal = make_deal("LAX", "JFK");
        assert_eq!(resolver.watchlist_boost(&profile, &deal), 0.5);
    }

    #[test]
    fn test_inactive_watchlist_no_boost() {
        let resolver = PreferenceResolver::new(0.5);
        let mut profile = make_profile();
        profile.watchlists = vec![make_watchlist(profile.user_id, "LAX", false)];
        let deal = make_deal("LAX", "JFK");
        assert_eq!(resolver.watchlist_boost(&profile, &deal), 0.0);
    }
}
