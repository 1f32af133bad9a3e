//! User preference profile entities.

pub mod alert_settings;
pub mod model;
pub mod tier;

pub use alert_settings::AlertSettings;
pub use model::{PreferredAirport, UserPreferenceProfile};
pub use tier::SubscriptionTier;
