//! Watchlist entity model and match predicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use farelens_core::types::id::{UserId, WatchlistId};

use crate::deal::Deal;

/// A route a user is watching for deals.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Watchlist {
    /// Unique watchlist identifier.
    pub id: WatchlistId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// IATA origin code.
    pub origin: String,
    /// IATA destination code, or `None` for any destination.
    pub destination: Option<String>,
    /// Inclusive start of the departure date range, if constrained.
    pub date_range_start: Option<DateTime<Utc>>,
    /// Inclusive end of the departure date range, if constrained.
    pub date_range_end: Option<DateTime<Utc>>,
    /// Maximum acceptable total price, if constrained.
    pub max_price: Option<f64>,
    /// Whether the watchlist participates in matching.
    pub is_active: bool,
    /// When the watchlist was created.
    pub created_at: DateTime<Utc>,
    /// When the watchlist was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Watchlist {
    /// Check whether a deal satisfies this watchlist's predicate.
    ///
    /// Inactive watchlists never match. The destination `None` acts as
    /// a wildcard; the date range is inclusive on both ends and applies
    /// to the deal's departure.
    pub fn matches(&self, deal: &Deal) -> bool {
        if !self.is_active {
            return false;
        }
        if !deal.origin.eq_ignore_ascii_case(&self.origin) {
            return false;
        }
        if let Some(ref dest) = self.destination {
            if !deal.destination.eq_ignore_ascii_case(dest) {
                return false;
            }
        }
        if let Some(start) = self.date_range_start {
            if deal.departure_date < start {
                return false;
            }
        }
        if let Some(end) = self.date_range_end {
            if deal.departure_date > end {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if deal.total_price > max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use farelens_core::types::id::DealId;

    fn make_deal() -> Deal {
        let now = Utc::now();
        Deal {
            id: DealId::new(),
            origin: "LAX".to_string(),
            destination: "JFK".to_string(),
            departure_date: now + Duration::days(14),
            return_date: now + Duration::days(21),
            total_price: 420.0,
            currency: "USD".to_string(),
            quality_score: 94,
            discount_percent: 35,
            normal_price: 646.0,
            created_at: now,
            expires_at: now + Duration::hours(12),
            airline: "Delta".to_string(),
            stops: 0,
            return_stops: Some(0),
            deep_link: "https://example.com/deal/lax-jfk".to_string(),
        }
    }

    fn make_watchlist() -> Watchlist {
        let now = Utc::now();
        Watchlist {
            id: WatchlistId::new(),
            user_id: UserId::new(),
            name: "LAX to JFK".to_string(),
            origin: "LAX".to_string(),
            destination: Some("JFK".to_string()),
            date_range_start: Some(now),
            date_range_end: Some(now + Duration::days(60)),
            max_price: Some(500.0),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_match() {
        assert!(make_watchlist().matches(&make_deal()));
    }

    #[test]
    fn test_inactive_never_matches() {
        let mut wl = make_watchlist();
        wl.is_active = false;
        assert!(!wl.matches(&make_deal()));
    }

    #[test]
    fn test_wildcard_destination() {
        let mut wl = make_watchlist();
        wl.destination = None;
        let mut deal = make_deal();
        deal.destination = "BOS".to_string();
        assert!(wl.matches(&deal));
    }

    #[test]
    fn test_origin_mismatch() {
        let mut deal = make_deal();
        deal.origin = "SFO".to_string();
        assert!(!make_watchlist().matches(&deal));
    }

    #[test]
    fn test_price_ceiling() {
        let mut deal = make_deal();
        deal.total_price = 501.0;
        assert!(!make_watchlist().matches(&deal));
    }

    #[test]
    fn test_departure_outside_range() {
        let mut deal = make_deal();
        deal.departure_date = Utc::now() + Duration::days(90);
        assert!(!make_watchlist().matches(&deal));
    }

    #[test]
    fn test_no_constraints_beyond_route() {
        let mut wl = make_watchlist();
        wl.date_range_start = None;
        wl.date_range_end = None;
        wl.max_price = None;
        let mut deal = make_deal();
        deal.total_price = 9999.0;
        deal.departure_date = Utc::now() + Duration::days(300);
        assert!(wl.matches(&deal));
    }
}
