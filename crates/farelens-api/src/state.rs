//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use farelens_cache::provider::CacheManager;
use farelens_core::config::AppConfig;
use farelens_database::repositories::{AlertHistoryRepository, ProfileRepository};
use farelens_engine::FeedService;
use farelens_ingest::DealSource;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager.
    pub cache: Arc<CacheManager>,
    /// Upstream deal source.
    pub source: Arc<dyn DealSource>,
    /// Curated feed pipeline.
    pub feed: Arc<FeedService>,
    /// User preference profiles.
    pub profiles: Arc<ProfileRepository>,
    /// Delivered alert history.
    pub history: Arc<AlertHistoryRepository>,
}
