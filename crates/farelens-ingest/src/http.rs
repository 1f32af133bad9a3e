//! HTTP deal source backed by the external price feed.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use farelens_core::config::ingest::IngestConfig;
use farelens_core::error::{AppError, ErrorKind};
use farelens_core::result::AppResult;
use farelens_entity::deal::Deal;

use crate::source::DealSource;

/// Deal source fetching from the upstream HTTP price feed.
#[derive(Debug, Clone)]
pub struct HttpDealSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDealSource {
    /// Create a new HTTP source from configuration.
    pub fn new(config: &IngestConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build ingest HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn map_request_error(err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::with_source(ErrorKind::Timeout, "Deal feed request timed out", err)
        } else {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Deal feed request failed: {err}"),
                err,
            )
        }
    }
}

#[async_trait]
impl DealSource for HttpDealSource {
    async fn fetch_deals(&self, origin: Option<&str>) -> AppResult<Vec<Deal>> {
        let mut request = self.client.get(format!("{}/deals", self.base_url));
        if let Some(origin) = origin {
            request = request.query(&[("origin", origin.to_uppercase())]);
        }

        let response = request.send().await.map_err(Self::map_request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Deal feed returned HTTP {status}"
            )));
        }

        let deals: Vec<Deal> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                "Failed to decode deal feed response",
                e,
            )
        })?;

        debug!(count = deals.len(), origin, "Fetched deals from feed");
        Ok(deals)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(Self::map_request_error)?;
        Ok(response.status().is_success())
    }
}
