//! Capacity-constrained feed curation.

use farelens_core::config::feed::FeedConfig;
use farelens_entity::deal::RankedDeal;
use farelens_entity::user::SubscriptionTier;

/// Selects the curated feed from a ranked candidate list.
///
/// Free tier: the top `free_capacity` deals at or above the excellent
/// floor, backfilled from the `[backfill_floor, excellent_floor)` band
/// when the excellent band runs short. Deals below the backfill floor
/// are never shown. Pro tier: the full ranked list, uncapped.
#[derive(Debug, Clone)]
pub struct Curator {
    config: FeedConfig,
}

impl Curator {
    /// Create a curator with the given feed settings.
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Curate a ranked candidate list for one tier. The input must
    /// already be in ranking order; the output preserves it.
    pub fn curate(&self, ranked: Vec<RankedDeal>, tier: SubscriptionTier) -> Vec<RankedDeal> {
        if tier.is_pro() {
            return ranked;
        }

        // Single pass splits the bands without disturbing rank order.
        let capacity = self.config.free_capacity;
        let mut excellent = Vec::new();
        let mut backfill = Vec::new();
        for candidate in ranked {
            if candidate.deal.quality_score >= self.config.excellent_floor {
                excellent.push(candidate);
            } else if candidate.deal.quality_score >= self.config.backfill_floor {
                backfill.push(candidate);
            }
        }

        excellent.truncate(capacity);
        if excellent.len() < capacity {
            let needed = capacity - excellent.len();
            excellent.extend(backfill.into_iter().take(needed));
        }
        excellent
    }
}
