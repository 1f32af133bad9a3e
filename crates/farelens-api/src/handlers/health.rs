//! Health check handlers.

use axum::Json;
use axum::extract::State;

use farelens_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();
    let cache = state.cache.health_check().await.unwrap_or(false);
    let deal_source = state.source.health_check().await.unwrap_or(false);

    let status = if database && cache && deal_source {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        database: probe_label(database),
        cache: probe_label(cache),
        deal_source: probe_label(deal_source),
    }))
}

fn probe_label(up: bool) -> String {
    if up { "up" } else { "down" }.to_string()
}
