//! Seeded in-memory deal source for development and tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use farelens_core::result::AppResult;
use farelens_core::types::id::DealId;
use farelens_entity::deal::Deal;

use crate::source::DealSource;

/// In-memory deal source with a fixed seed set.
#[derive(Debug, Default)]
pub struct InMemoryDealSource {
    deals: Vec<Deal>,
}

impl InMemoryDealSource {
    /// Create a source serving the given deals.
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    /// Create a source with a small seed set spanning a few routes and
    /// quality bands, enough to exercise ranking and curation locally.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let seed = |origin: &str,
                    destination: &str,
                    price: f64,
                    normal: f64,
                    score: i32,
                    discount: i32,
                    airline: &str,
                    stops: i32| Deal {
            id: DealId::new(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: now + Duration::days(21),
            return_date: now + Duration::days(28),
            total_price: price,
            currency: "USD".to_string(),
            quality_score: score,
            discount_percent: discount,
            normal_price: normal,
            created_at: now,
            expires_at: now + Duration::hours(24),
            airline: airline.to_string(),
            stops,
            return_stops: Some(stops),
            deep_link: format!(
                "https://deals.example.com/{}-{}",
                origin.to_lowercase(),
                destination.to_lowercase()
            ),
        };

        Self::new(vec![
            seed("LAX", "JFK", 420.0, 646.0, 94, 35, "Delta", 0),
            seed("LAX", "CDG", 512.0, 980.0, 88, 48, "Air France", 0),
            seed("LAX", "HNL", 298.0, 420.0, 76, 29, "Hawaiian", 0),
            seed("SFO", "NRT", 689.0, 1150.0, 91, 40, "United", 0),
            seed("SFO", "JFK", 310.0, 430.0, 72, 28, "JetBlue", 1),
            seed("JFK", "LHR", 455.0, 820.0, 85, 44, "British Airways", 0),
        ])
    }
}

#[async_trait]
impl DealSource for InMemoryDealSource {
    async fn fetch_deals(&self, origin: Option<&str>) -> AppResult<Vec<Deal>> {
        let now = Utc::now();
        Ok(self
            .deals
            .iter()
            .filter(|d| !d.is_expired(now))
            .filter(|d| {
                origin
                    .map(|o| d.origin.eq_ignore_ascii_case(o))
                    .unwrap_or(true)
            })
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
