//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the alert scan cycle.
    #[serde(default = "default_alert_scan_cron")]
    pub alert_scan_cron: String,
    /// Cron expression for the duplicate-record sweep.
    #[serde(default = "default_dedup_sweep_cron")]
    pub dedup_sweep_cron: String,
    /// Cron expression for purging stale daily counters.
    #[serde(default = "default_counter_purge_cron")]
    pub counter_purge_cron: String,
    /// Days of counter history to retain before purging.
    #[serde(default = "default_counter_retention_days")]
    pub counter_retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alert_scan_cron: default_alert_scan_cron(),
            dedup_sweep_cron: default_dedup_sweep_cron(),
            counter_purge_cron: default_counter_purge_cron(),
            counter_retention_days: default_counter_retention_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_alert_scan_cron() -> String {
    // Every 5 minutes
    "0 */5 * * * *".to_string()
}

fn default_dedup_sweep_cron() -> String {
    // Daily at 2 AM
    "0 0 2 * * *".to_string()
}

fn default_counter_purge_cron() -> String {
    // Daily at 3 AM
    "0 0 3 * * *".to_string()
}

fn default_counter_retention_days() -> i64 {
    7
}
