//! User preference profile model.

use serde::{Deserialize, Serialize};

use farelens_core::AppError;
use farelens_core::types::id::UserId;

use super::alert_settings::AlertSettings;
use super::tier::SubscriptionTier;
use crate::watchlist::Watchlist;

/// Tolerance when checking that preferred-airport weights sum to 1.0.
pub const WEIGHT_SUM_EPSILON: f64 = 0.001;

/// A preferred origin airport with its ranking weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferredAirport {
    /// IATA airport code.
    pub iata: String,
    /// Weight in [0, 1]. Weights across a user's preferred airports
    /// must sum to 1.0 within [`WEIGHT_SUM_EPSILON`].
    pub weight: f64,
}

/// Everything the ranking and admission engine needs to know about a
/// user, assembled by the profile store.
///
/// Read-only from the engine's perspective; profile mutation happens
/// upstream and is validated there before it can reach this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferenceProfile {
    /// The user this profile belongs to.
    pub user_id: UserId,
    /// Subscription tier.
    pub tier: SubscriptionTier,
    /// Offset of the user's local time from UTC, in minutes. Resolved
    /// from the user's IANA zone at profile-update time.
    pub utc_offset_minutes: i32,
    /// Preferred origin airports with weights.
    pub preferred_airports: Vec<PreferredAirport>,
    /// Alert delivery settings.
    pub alerts: AlertSettings,
    /// The user's watchlists (active and inactive).
    pub watchlists: Vec<Watchlist>,
}

impl UserPreferenceProfile {
    /// Validate profile invariants.
    ///
    /// Rejected upstream at profile-update time; enforced here as well
    /// so a corrupt row cannot silently skew ranking.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.preferred_airports.is_empty() {
            let sum: f64 = self.preferred_airports.iter().map(|a| a.weight).sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
                return Err(AppError::validation(format!(
                    "Preferred airport weights must sum to 1.0 (got {sum:.4})"
                )));
            }
        }
        for airport in &self.preferred_airports {
            if !(0.0..=1.0).contains(&airport.weight) {
                return Err(AppError::validation(format!(
                    "Airport weight out of range for {}: {}",
                    airport.iata, airport.weight
                )));
            }
        }
        for hour in [self.alerts.quiet_hours_start, self.alerts.quiet_hours_end] {
            if !(0..24).contains(&hour) {
                return Err(AppError::validation(format!(
                    "Quiet hour out of range: {hour}"
                )));
            }
        }
        if self.alerts.watchlist_only_mode && !self.tier.allows_watchlist_only() {
            return Err(AppError::validation(
                "Preference-only delivery requires the pro tier",
            ));
        }
        Ok(())
    }

    /// Watchlists currently in effect.
    pub fn active_watchlists(&self) -> impl Iterator<Item = &Watchlist> {
        self.watchlists.iter().filter(|w| w.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> UserPreferenceProfile {
        UserPreferenceProfile {
            user_id: UserId::new(),
            tier: SubscriptionTier::Free,
            utc_offset_minutes: -480,
            preferred_airports: vec![
                PreferredAirport {
                    iata: "LAX".to_string(),
                    weight: 0.7,
                },
                PreferredAirport {
                    iata: "BUR".to_string(),
                    weight: 0.3,
                },
            ],
            alerts: AlertSettings::default(),
            watchlists: vec![],
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(base_profile().validate().is_ok());
    }

    #[test]
    fn test_weights_within_epsilon() {
        let mut profile = base_profile();
        profile.preferred_airports[0].weight = 0.7005;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_weights_off_by_too_much() {
        let mut profile = base_profile();
        profile.preferred_airports[0].weight = 0.8;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_watchlist_only_rejected_on_free_tier() {
        let mut profile = base_profile();
        profile.alerts.watchlist_only_mode = true;
        assert!(profile.validate().is_err());

        profile.tier = SubscriptionTier::Pro;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_airports_allowed() {
        let mut profile = base_profile();
        profile.preferred_airports.clear();
        assert!(profile.validate().is_ok());
    }
}
