//! Flight deal entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farelens_core::types::id::DealId;

/// A flight offer ingested from the external price feed.
///
/// Deals are immutable once ingested; a re-ingestion supersedes the old
/// record rather than mutating it. The `quality_score` arrives
/// pre-computed from the upstream process and is never changed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    /// Unique deal identifier.
    pub id: DealId,
    /// IATA origin code.
    pub origin: String,
    /// IATA destination code.
    pub destination: String,
    /// Outbound departure instant.
    pub departure_date: DateTime<Utc>,
    /// Return departure instant.
    pub return_date: DateTime<Utc>,
    /// Total round-trip price.
    pub total_price: f64,
    /// ISO currency code.
    pub currency: String,
    /// Externally computed attractiveness rating in [0, 100].
    pub quality_score: i32,
    /// Discount relative to the normal price, in percent.
    pub discount_percent: i32,
    /// Undiscounted reference price.
    pub normal_price: f64,
    /// When the deal was ingested.
    pub created_at: DateTime<Utc>,
    /// When the deal expires.
    pub expires_at: DateTime<Utc>,
    /// Operating carrier.
    pub airline: String,
    /// Outbound stop count.
    pub stops: i32,
    /// Return stop count, if known.
    pub return_stops: Option<i32>,
    /// Booking deep link.
    pub deep_link: String,
}

impl Deal {
    /// Check whether the deal has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_deal(expires_in_hours: i64) -> Deal {
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
            expires_at: now + Duration::hours(expires_in_hours),
            airline: "Delta".to_string(),
            stops: 0,
            return_stops: Some(0),
            deep_link: "https://example.com/deal/lax-jfk".to_string(),
        }
    }

    #[test]
    fn test_not_expired_within_window() {
        let deal = make_deal(12);
        assert!(!deal.is_expired(Utc::now()));
    }

    #[test]
    fn test_expired_past_window() {
        let deal = make_deal(-1);
        assert!(deal.is_expired(Utc::now()));
    }
}
