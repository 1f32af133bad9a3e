//! Per-user alert delivery settings.

use serde::{Deserialize, Serialize};

/// Alert delivery preferences for a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSettings {
    /// Master switch: whether any alerts are delivered at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the quiet-hour window is enforced.
    #[serde(default = "default_true")]
    pub quiet_hours_enabled: bool,
    /// Quiet window start, hour-of-day 0-23.
    #[serde(default = "default_quiet_start")]
    pub quiet_hours_start: i32,
    /// Quiet window end, hour-of-day 0-23. May be less than or equal to
    /// the start, in which case the window wraps past midnight.
    #[serde(default = "default_quiet_end")]
    pub quiet_hours_end: i32,
    /// Preference-only delivery: only deals matching an active watchlist
    /// are alerted. Pro-tier feature.
    #[serde(default)]
    pub watchlist_only_mode: bool,
}

impl AlertSettings {
    /// Check whether `hour` (0-23, user-local) falls inside the quiet
    /// window.
    ///
    /// With `start < end` the window is `[start, end)`. With
    /// `start >= end` it wraps midnight: `[start, 24) ∪ [0, end)`.
    pub fn is_quiet_hour(&self, hour: i32) -> bool {
        if !self.quiet_hours_enabled {
            return false;
        }
        let (start, end) = (self.quiet_hours_start, self.quiet_hours_end);
        if start < end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        }
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_hours_enabled: true,
            quiet_hours_start: default_quiet_start(),
            quiet_hours_end: default_quiet_end(),
            watchlist_only_mode: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_quiet_start() -> i32 {
    22
}

fn default_quiet_end() -> i32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(start: i32, end: i32) -> AlertSettings {
        AlertSettings {
            quiet_hours_start: start,
            quiet_hours_end: end,
            ..AlertSettings::default()
        }
    }

    #[test]
    fn test_wrapping_window() {
        let s = settings(22, 7);
        for hour in [22, 23, 0, 1, 2, 3, 4, 5, 6] {
            assert!(s.is_quiet_hour(hour), "hour {hour} should be quiet");
        }
        for hour in 7..22 {
            assert!(!s.is_quiet_hour(hour), "hour {hour} should not be quiet");
        }
    }

    #[test]
    fn test_non_wrapping_window() {
        let s = settings(1, 6);
        assert!(s.is_quiet_hour(1));
        assert!(s.is_quiet_hour(5));
        assert!(!s.is_quiet_hour(6));
        assert!(!s.is_quiet_hour(0));
    }

    #[test]
    fn test_disabled_window_never_quiet() {
        let mut s = settings(22, 7);
        s.quiet_hours_enabled = false;
        assert!(!s.is_quiet_hour(23));
    }

    #[test]
    fn test_equal_start_end_covers_full_day() {
        let s = settings(9, 9);
        for hour in 0..24 {
            assert!(s.is_quiet_hour(hour));
        }
    }
}
