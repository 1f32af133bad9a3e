//! Deal ingestion feed configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external deal ingestion feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Deal source type: `"http"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the upstream price feed (http provider).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds for upstream fetches.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_base_url() -> String {
    "http://localhost:9090".to_string()
}

fn default_timeout() -> u64 {
    5
}
