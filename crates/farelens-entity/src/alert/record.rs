//! Persisted record of a delivered alert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use farelens_core::types::id::{AlertId, DealId, UserId};

use crate::deal::Deal;

/// A delivered alert, as stored in history.
///
/// Carries a denormalized snapshot of the deal so history stays
/// readable after the deal itself expires.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertRecord {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The user the alert was delivered to.
    pub user_id: UserId,
    /// The deal that triggered the alert.
    pub deal_id: DealId,
    /// IATA origin code at delivery time.
    pub origin: String,
    /// IATA destination code at delivery time.
    pub destination: String,
    /// Total price at delivery time.
    pub total_price: f64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Quality score at delivery time.
    pub quality_score: i32,
    /// When the alert was delivered.
    pub sent_at: DateTime<Utc>,
}

impl AlertRecord {
    /// Build a history record for a deal admitted at `sent_at`.
    pub fn from_deal(user_id: UserId, deal: &Deal, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: AlertId::new(),
            user_id,
            deal_id: deal.id,
            origin: deal.origin.clone(),
            destination: deal.destination.clone(),
            total_price: deal.total_price,
            currency: deal.currency.clone(),
            quality_score: deal.quality_score,
            sent_at,
        }
    }
}
