//! Cached curated-feed pipeline.
//!
//! Wraps fetch, rank, and curate behind a per-(user, origin) result
//! cache. Cached entries carry a versioned envelope so a serialization
//! change degrades to one extra recomputation instead of a failure.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use farelens_cache::keys;
use farelens_core::config::feed::FeedConfig;
use farelens_core::error::ErrorKind;
use farelens_core::result::AppResult;
use farelens_core::traits::cache::CacheProvider;
use farelens_entity::deal::RankedDeal;
use farelens_entity::user::UserPreferenceProfile;
use farelens_ingest::DealSource;

use crate::curation::Curator;
use crate::scoring::Scorer;

/// Current envelope shape version.
const FEED_CACHE_VERSION: u32 = 1;

/// Versioned cache envelope for a curated feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedFeed {
    /// Envelope shape version.
    version: u32,
    /// Request time of the pass that produced this entry.
    generated_at: DateTime<Utc>,
    /// The curated feed, in ranked order.
    deals: Vec<RankedDeal>,
}

/// Produces curated feeds, caching results per (user, origin).
#[derive(Debug)]
pub struct FeedService {
    source: Arc<dyn DealSource>,
    cache: Arc<dyn CacheProvider>,
    scorer: Scorer,
    curator: Curator,
    config: FeedConfig,
}

impl FeedService {
    /// Create a feed service over the given source and cache.
    pub fn new(
        source: Arc<dyn DealSource>,
        cache: Arc<dyn CacheProvider>,
        scorer: Scorer,
        curator: Curator,
        config: FeedConfig,
    ) -> Self {
        Self {
            source,
            cache,
            scorer,
            curator,
            config,
        }
    }

    /// The curated feed for a user, optionally restricted to one origin.
    ///
    /// Serves from cache while fresh. On an upstream timeout a stale
    /// entry is served while still inside the grace window, otherwise
    /// the cycle yields an empty feed rather than an error.
    pub async fn curated_feed(
        &self,
        profile: &UserPreferenceProfile,
        origin: Option<&str>,
    ) -> AppResult<Vec<RankedDeal>> {
        let requested_at = Utc::now();
        let key = feed_key(profile, origin);

        let cached = self.read_cache(&key).await;
        if let Some(feed) = &cached {
            if requested_at - feed.generated_at <= Duration::seconds(self.ttl_seconds()) {
                debug!(%key, "Serving curated feed from cache");
                return Ok(feed.deals.clone());
            }
        }

        let deals = match self.source.fetch_deals(origin).await {
            Ok(deals) => deals,
            Err(err) if matches!(err.kind, ErrorKind::Timeout | ErrorKind::ExternalService) => {
                warn!(%key, error = %err, "Deal feed fetch failed");
                if let Some(feed) = cached {
                    if requested_at - feed.generated_at
                        <= Duration::seconds(self.grace_seconds())
                    {
                        debug!(%key, "Serving stale curated feed within grace window");
                        return Ok(feed.deals);
                    }
                }
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let ranked = self.scorer.rank(deals, profile);
        let curated = self.curator.curate(ranked, profile.tier);
        self.write_cache(&key, requested_at, &curated).await;
        Ok(curated)
    }

    async fn read_cache(&self, key: &str) -> Option<CachedFeed> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => decode_envelope(&raw),
            Ok(None) => None,
            Err(err) => {
                warn!(%key, error = %err, "Feed cache read failed, treating as miss");
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, requested_at: DateTime<Utc>, deals: &[RankedDeal]) {
        // Last writer by request time: a slow pass for an older request
        // must not clobber the result of a newer one.
        if let Some(existing) = self.read_cache(key).await {
            if existing.generated_at > requested_at {
                debug!(%key, "Discarding superseded feed result");
                return;
            }
        }

        let envelope = CachedFeed {
            version: FEED_CACHE_VERSION,
            generated_at: requested_at,
            deals: deals.to_vec(),
        };
        let json = match serde_json::to_string(&envelope) {
            Ok(json) => json,
            Err(err) => {
                warn!(%key, error = %err, "Failed to encode feed cache envelope");
                return;
            }
        };
        // Physical expiry covers the grace window; freshness is decided
        // by the envelope timestamp.
        let physical_ttl = self.ttl_seconds().max(self.grace_seconds()) as u64;
        if let Err(err) = self
            .cache
            .set(key, &json, StdDuration::from_secs(physical_ttl))
            .await
        {
            warn!(%key, error = %err, "Feed cache write failed");
        }
    }

    fn ttl_seconds(&self) -> i64 {
        self.config.cache_ttl_seconds as i64
    }

    fn grace_seconds(&self) -> i64 {
        self.config.grace_seconds as i64
    }
}

fn feed_key(profile: &UserPreferenceProfile, origin: Option<&str>) -> String {
    keys::curated_feed(profile.user_id.into_uuid(), origin.unwrap_or("all"))
}

/// Decode a cached envelope, tolerating the legacy bare-array shape.
/// Legacy entries carry no timestamp and decode as already expired, so
/// the next pass rewrites them in the current shape.
fn decode_envelope(raw: &str) -> Option<CachedFeed> {
    if let Ok(feed) = serde_json::from_str::<CachedFeed>(raw) {
        return Some(feed);
    }
    serde_json::from_str::<Vec<RankedDeal>>(raw)
        .ok()
        .map(|deals| CachedFeed {
            version: 0,
            generated_at: DateTime::UNIX_EPOCH,
            deals,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_current_envelope() {
        let raw = format!(
            "{{\"version\":1,\"generated_at\":\"{}\",\"deals\":[]}}",
            Utc::now().to_rfc3339()
        );
        let feed = decode_envelope(&raw).unwrap();
        assert_eq!(feed.version, FEED_CACHE_VERSION);
    }

    #[test]
    fn test_decode_legacy_bare_array() {
        let feed = decode_envelope("[]").unwrap();
        assert_eq!(feed.version, 0);
        assert_eq!(feed.generated_at, DateTime::UNIX_EPOCH);
        assert!(feed.deals.is_empty());
    }

    #[test]
    fn test_decode_garbage_is_miss() {
        assert!(decode_envelope("not json").is_none());
    }
}
