//! Ranked deal wrapper.

use serde::{Deserialize, Serialize};

use super::model::Deal;

/// A deal paired with its computed ranking key.
///
/// Ephemeral: recomputed on every ranking pass and never persisted
/// independently of the deal it wraps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDeal {
    /// The underlying deal.
    pub deal: Deal,
    /// Derived ranking key combining quality score with preference boosts.
    pub queue_score: f64,
}

impl RankedDeal {
    /// Pair a deal with its ranking key.
    pub fn new(deal: Deal, queue_score: f64) -> Self {
        Self { deal, queue_score }
    }
}
