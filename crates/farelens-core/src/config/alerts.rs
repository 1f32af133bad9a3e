//! Alert admission configuration: daily caps, duplicate-suppression
//! window, and preference boost parameters.

use serde::{Deserialize, Serialize};

/// Alert admission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Maximum alerts per local calendar day for free-tier users.
    #[serde(default = "default_free_daily_cap")]
    pub free_daily_cap: i64,
    /// Maximum alerts per local calendar day for pro-tier users.
    #[serde(default = "default_pro_daily_cap")]
    pub pro_daily_cap: i64,
    /// Window in hours during which a repeat alert for the same
    /// (user, deal) is suppressed.
    #[serde(default = "default_dedup_window_hours")]
    pub dedup_window_hours: i64,
    /// Score multiplier bonus applied when a deal matches any of the
    /// user's active watchlists.
    #[serde(default = "default_watchlist_boost")]
    pub watchlist_boost: f64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            free_daily_cap: default_free_daily_cap(),
            pro_daily_cap: default_pro_daily_cap(),
            dedup_window_hours: default_dedup_window_hours(),
            watchlist_boost: default_watchlist_boost(),
        }
    }
}

fn default_free_daily_cap() -> i64 {
    3
}

fn default_pro_daily_cap() -> i64 {
    6
}

fn default_dedup_window_hours() -> i64 {
    12
}

fn default_watchlist_boost() -> f64 {
    0.5
}
