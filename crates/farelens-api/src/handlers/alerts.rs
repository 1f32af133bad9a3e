//! Alert history handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use farelens_core::types::id::UserId;

use crate::dto::response::{AlertHistoryResponse, ApiResponse};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Query parameters for alert history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// The user whose history to read.
    pub user_id: Uuid,
    /// Maximum records to return, newest first.
    pub limit: Option<i64>,
}

/// GET /api/alerts/history
pub async fn alert_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<AlertHistoryResponse>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let alerts = state
        .history
        .find_recent_by_user(UserId::from_uuid(query.user_id), limit)
        .await?;

    let count = alerts.len();
    Ok(Json(ApiResponse::ok(AlertHistoryResponse { alerts, count })))
}
