//! Subscription tier enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription tier governing caps and feature gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free tier: capped feed, capped daily alerts.
    Free,
    /// Paid tier: uncapped feed, higher daily alert cap, extra
    /// delivery modes.
    Pro,
}

impl SubscriptionTier {
    /// Check whether this tier has paid features.
    pub fn is_pro(&self) -> bool {
        matches!(self, Self::Pro)
    }

    /// Whether the preference-only delivery mode is available.
    pub fn allows_watchlist_only(&self) -> bool {
        self.is_pro()
    }

    /// Return the tier as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = farelens_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            _ => Err(farelens_core::AppError::validation(format!(
                "Invalid subscription tier: '{s}'. Expected one of: free, pro"
            ))),
        }
    }
}
