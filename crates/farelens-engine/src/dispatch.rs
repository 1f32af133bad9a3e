//! Outbound alert dispatch seam.
//!
//! The engine decides admission; delivery transport (push tokens,
//! retries, provider failures) belongs to the dispatcher behind this
//! trait.

use async_trait::async_trait;
use tracing::info;

use farelens_core::result::AppResult;
use farelens_core::types::id::UserId;
use farelens_entity::deal::Deal;

/// Receives admitted alerts for delivery.
#[async_trait]
pub trait AlertDispatcher: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver an admitted alert to the user.
    async fn dispatch(&self, user_id: UserId, deal: &Deal) -> AppResult<()>;
}

/// Default dispatcher: logs the delivery and does nothing else.
/// Stands in until a push transport is wired up.
#[derive(Debug, Default, Clone)]
pub struct TracingDispatcher;

#[async_trait]
impl AlertDispatcher for TracingDispatcher {
    async fn dispatch(&self, user_id: UserId, deal: &Deal) -> AppResult<()> {
        info!(
            user_id = %user_id,
            deal_id = %deal.id,
            origin = %deal.origin,
            destination = %deal.destination,
            price = deal.total_price,
            quality_score = deal.quality_score,
            "Dispatching deal alert"
        );
        Ok(())
    }
}
