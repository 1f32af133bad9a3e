//! Queue scoring and deterministic ranking.

use std::cmp::Ordering;

use farelens_entity::deal::{Deal, RankedDeal};
use farelens_entity::user::UserPreferenceProfile;

use crate::preference::PreferenceResolver;

/// Computes queue scores and produces the ranked candidate list.
#[derive(Debug, Clone)]
pub struct Scorer {
    resolver: PreferenceResolver,
}

impl Scorer {
    /// Create a scorer over the given preference resolver.
    pub fn new(resolver: PreferenceResolver) -> Self {
        Self { resolver }
    }

    /// Queue score for one deal:
    /// `quality × (1 + watchlistBoost) × (1 + airportWeight)`.
    pub fn queue_score(&self, profile: &UserPreferenceProfile, deal: &Deal) -> f64 {
        let boost = self.resolver.watchlist_boost(profile, deal);
        let weight = self.resolver.airport_weight(profile, &deal.origin);
        f64::from(deal.quality_score) * (1.0 + boost) * (1.0 + weight)
    }

    /// Rank candidates by descending queue score. Ties break by
    /// ascending total price, then ascending departure date. The sort
    /// is stable so identical inputs always produce identical output.
    pub fn rank(&self, deals: Vec<Deal>, profile: &UserPreferenceProfile) -> Vec<RankedDeal> {
        let mut ranked: Vec<RankedDeal> = deals
            .into_iter()
            .map(|deal| {
                let score = self.queue_score(profile, &deal);
                RankedDeal::new(deal, score)
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.queue_score
                .partial_cmp(&a.queue_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.deal
                        .total_price
                        .partial_cmp(&b.deal.total_price)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.deal.departure_date.cmp(&b.deal.departure_date))
        });
        ranked
    }
}
