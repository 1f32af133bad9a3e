//! Feed curation and result cache configuration.

use serde::{Deserialize, Serialize};

/// Curation and result-cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Maximum entries in a free-tier curated feed.
    #[serde(default = "default_capacity")]
    pub free_capacity: usize,
    /// Quality score at or above which a deal counts as "excellent".
    #[serde(default = "default_excellent_floor")]
    pub excellent_floor: i32,
    /// Quality score at or above which a deal may backfill the feed.
    /// Deals below this floor are never shown.
    #[serde(default = "default_backfill_floor")]
    pub backfill_floor: i32,
    /// Freshness window for cached curated results, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Grace window in seconds: a stale cached result may still be
    /// served this long past its write if the upstream fetch times out.
    #[serde(default = "default_grace")]
    pub grace_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            free_capacity: default_capacity(),
            excellent_floor: default_excellent_floor(),
            backfill_floor: default_backfill_floor(),
            cache_ttl_seconds: default_cache_ttl(),
            grace_seconds: default_grace(),
        }
    }
}

fn default_capacity() -> usize {
    20
}

fn default_excellent_floor() -> i32 {
    80
}

fn default_backfill_floor() -> i32 {
    70
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_grace() -> u64 {
    900
}
