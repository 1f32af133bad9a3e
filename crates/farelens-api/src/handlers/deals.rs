//! Deal feed handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use farelens_core::error::AppError;
use farelens_core::result::AppResult;
use farelens_core::types::id::UserId;
use farelens_entity::deal::Deal;
use farelens_entity::user::{AlertSettings, SubscriptionTier, UserPreferenceProfile};

use crate::dto::response::{ApiResponse, DealListResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the deal feed.
#[derive(Debug, Deserialize)]
pub struct DealsQuery {
    /// Restrict to deals departing from this origin.
    pub origin: Option<String>,
    /// Personalize for this user; anonymous feed when absent.
    pub user_id: Option<Uuid>,
    /// Cap the number of returned deals.
    pub limit: Option<usize>,
}

/// GET /api/deals
pub async fn list_deals(
    State(state): State<AppState>,
    Query(query): Query<DealsQuery>,
) -> Result<Json<ApiResponse<DealListResponse>>, ApiError> {
    let profile = resolve_profile(&state, query.user_id).await?;
    let mut deals = state
        .feed
        .curated_feed(&profile, query.origin.as_deref())
        .await?;
    if let Some(limit) = query.limit {
        deals.truncate(limit);
    }

    let count = deals.len();
    Ok(Json(ApiResponse::ok(DealListResponse { deals, count })))
}

/// GET /api/deals/{id}
pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Deal>>, ApiError> {
    let deals = state.source.fetch_deals(None).await?;
    let deal = deals
        .into_iter()
        .find(|d| d.id.into_uuid() == id)
        .ok_or_else(|| AppError::not_found(format!("Deal not found: {id}")))?;
    Ok(Json(ApiResponse::ok(deal)))
}

async fn resolve_profile(
    state: &AppState,
    user_id: Option<Uuid>,
) -> AppResult<UserPreferenceProfile> {
    match user_id {
        Some(id) => state
            .profiles
            .find_by_user_id(UserId::from_uuid(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("User profile not found: {id}"))),
        None => Ok(anonymous_profile()),
    }
}

/// Unpersonalized free-tier view shared by all anonymous requests.
fn anonymous_profile() -> UserPreferenceProfile {
    UserPreferenceProfile {
        user_id: UserId::from_uuid(Uuid::nil()),
        tier: SubscriptionTier::Free,
        utc_offset_minutes: 0,
        preferred_airports: vec![],
        alerts: AlertSettings::default(),
        watchlists: vec![],
    }
}
