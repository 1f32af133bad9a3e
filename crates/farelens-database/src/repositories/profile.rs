//! User preference profile repository.
//!
//! Profiles are assembled from three tables: the profile row itself,
//! the preferred airports, and the user's watchlists. Assembly is
//! read-only here; profile mutation is handled by an upstream service
//! and is outside this engine's scope.

use sqlx::{FromRow, PgPool};

use farelens_core::error::{AppError, ErrorKind};
use farelens_core::result::AppResult;
use farelens_core::types::id::UserId;
use farelens_entity::user::{AlertSettings, PreferredAirport, SubscriptionTier, UserPreferenceProfile};
use farelens_entity::watchlist::Watchlist;

/// Flat row shape of the `user_profiles` table.
#[derive(Debug, FromRow)]
struct ProfileRow {
    user_id: UserId,
    tier: SubscriptionTier,
    utc_offset_minutes: i32,
    alerts_enabled: bool,
    quiet_hours_enabled: bool,
    quiet_hours_start: i32,
    quiet_hours_end: i32,
    watchlist_only_mode: bool,
}

#[derive(Debug, FromRow)]
struct AirportRow {
    iata: String,
    weight: f64,
}

/// Repository assembling [`UserPreferenceProfile`] entities.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch and assemble the full profile for a user.
    pub async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<UserPreferenceProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, tier, utc_offset_minutes, alerts_enabled, \
                    quiet_hours_enabled, quiet_hours_start, quiet_hours_end, \
                    watchlist_only_mode \
             FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user profile", e)
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let airports = sqlx::query_as::<_, AirportRow>(
            "SELECT iata, weight FROM preferred_airports WHERE user_id = $1 ORDER BY iata",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load preferred airports", e)
        })?;

        let watchlists = sqlx::query_as::<_, Watchlist>(
            "SELECT id, user_id, name, origin, destination, date_range_start, \
                    date_range_end, max_price, is_active, created_at, updated_at \
             FROM watchlists WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load watchlists", e)
        })?;

        Ok(Some(assemble(row, airports, watchlists)))
    }

    /// IDs of users whose alerts are switched on, for the alert scan.
    pub async fn list_alert_candidates(&self) -> AppResult<Vec<UserId>> {
        sqlx::query_scalar("SELECT user_id FROM user_profiles WHERE alerts_enabled")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list alert candidates", e)
            })
    }
}

fn assemble(
    row: ProfileRow,
    airports: Vec<AirportRow>,
    watchlists: Vec<Watchlist>,
) -> UserPreferenceProfile {
    UserPreferenceProfile {
        user_id: row.user_id,
        tier: row.tier,
        utc_offset_minutes: row.utc_offset_minutes,
        preferred_airports: airports
            .into_iter()
            .map(|a| PreferredAirport {
                iata: a.iata,
                weight: a.weight,
            })
            .collect(),
        alerts: AlertSettings {
            enabled: row.alerts_enabled,
            quiet_hours_enabled: row.quiet_hours_enabled,
            quiet_hours_start: row.quiet_hours_start,
            quiet_hours_end: row.quiet_hours_end,
            watchlist_only_mode: row.watchlist_only_mode,
        },
        watchlists,
    }
}
