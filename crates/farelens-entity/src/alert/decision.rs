//! Admission decision types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an alert was not delivered.
///
/// Ordered by evaluation priority: when several reasons apply, the
/// earliest variant here is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    /// The user has alerts switched off.
    Disabled,
    /// Preference-only delivery is on and no active watchlist matched.
    NotWatched,
    /// The same deal was already alerted to this user recently.
    Duplicate,
    /// The user's local time falls inside their quiet window.
    QuietHours,
    /// The user's daily alert quota is exhausted.
    CapReached,
}

impl DenyReason {
    /// Return the reason as a stable wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "DISABLED",
            Self::NotWatched => "NOT_WATCHED",
            Self::Duplicate => "DUPLICATE",
            Self::QuietHours => "QUIET_HOURS",
            Self::CapReached => "CAP_REACHED",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of evaluating one candidate alert for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionDecision {
    /// The alert may be delivered; side effects have been recorded.
    Allow,
    /// The alert is suppressed.
    Deny {
        /// The first rule in the chain that rejected it.
        reason: DenyReason,
    },
}

impl AdmissionDecision {
    /// Convenience constructor for a denial.
    pub fn deny(reason: DenyReason) -> Self {
        Self::Deny { reason }
    }

    /// Whether the alert was admitted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}
