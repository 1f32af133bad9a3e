//! Response DTOs.

use serde::{Deserialize, Serialize};

use farelens_entity::alert::AlertRecord;
use farelens_entity::deal::RankedDeal;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Curated deal feed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealListResponse {
    /// Deals in ranked order.
    pub deals: Vec<RankedDeal>,
    /// Number of deals returned.
    pub count: usize,
}

/// Alert history response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertHistoryResponse {
    /// Delivered alerts, newest first.
    pub alerts: Vec<AlertRecord>,
    /// Number of alerts returned.
    pub count: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Cache status.
    pub cache: String,
    /// Deal feed status.
    pub deal_source: String,
}
