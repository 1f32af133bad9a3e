//! Cache key builders for FareLens cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all FareLens cache keys.
const PREFIX: &str = "farelens";

/// Cache key for a user's curated deal feed for one origin.
pub fn curated_feed(user_id: Uuid, origin: &str) -> String {
    format!("{PREFIX}:feed:{user_id}:{}", origin.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_key_uppercases_origin() {
        let id = Uuid::nil();
        assert_eq!(
            curated_feed(id, "lax"),
            "farelens:feed:00000000-0000-0000-0000-000000000000:LAX"
        );
    }
}
