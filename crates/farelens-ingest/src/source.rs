//! Deal source trait and provider selection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use farelens_core::config::ingest::IngestConfig;
use farelens_core::error::AppError;
use farelens_core::result::AppResult;
use farelens_entity::deal::Deal;

/// Trait for upstream deal feeds.
///
/// Sources return current, unexpired deals; quality scores arrive
/// pre-computed from upstream and are passed through untouched.
#[async_trait]
pub trait DealSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch current deals, optionally restricted to one origin airport.
    async fn fetch_deals(&self, origin: Option<&str>) -> AppResult<Vec<Deal>>;

    /// Check that the source is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Build the configured deal source.
pub fn build_source(config: &IngestConfig) -> AppResult<Arc<dyn DealSource>> {
    match config.provider.as_str() {
        "http" => {
            info!(base_url = %config.base_url, "Initializing HTTP deal source");
            Ok(Arc::new(crate::http::HttpDealSource::new(config)?))
        }
        "memory" => {
            info!("Initializing seeded in-memory deal source");
            Ok(Arc::new(crate::memory::InMemoryDealSource::seeded()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown ingest provider: '{other}'. Supported: http, memory"
        ))),
    }
}
