use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheState, classify, read_cache, write_cache};
use crate::config::WEATHER_CACHE_TTL_SECS;
use crate::error::WeatherError;
use crate::model::{ConditionSnapshot, Location};
use crate::providers::WeatherApi;

/// Everything the presentation layer needs, plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: Location,
    pub conditions: ConditionSnapshot,
    pub expires_at: DateTime<Utc>,
    pub state: CacheState,
    pub refreshed: bool,
}

/// Single-file cache in front of the geocode + conditions calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    path: PathBuf,
    ttl_secs: u64,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_ttl(path, WEATHER_CACHE_TTL_SECS)
    }

    pub fn with_ttl(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            path: path.into(),
            ttl_secs: ttl_secs.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached report when it is still valid for `requested`;
    /// otherwise refreshes it and overwrites the cache file. A failed refresh
    /// leaves the file untouched.
    pub fn get<P, N>(
        &self,
        providers: &P,
        now_fn: N,
        requested: &str,
    ) -> Result<WeatherReport, WeatherError>
    where
        P: WeatherApi,
        N: Fn() -> DateTime<Utc>,
    {
        let now = now_fn();
        let loaded = read_cache(&self.path)?;
        let state = classify(loaded.as_ref(), requested, now);
        debug!(
            path = %self.path.display(),
            location = requested,
            state = state.as_str(),
            "loaded weather cache"
        );

        let state = match (state, loaded.as_ref().and_then(reuse)) {
            (CacheState::PresentValid, Some(report)) => return Ok(report),
            (CacheState::PresentValid, None) => {
                debug!("valid cache entry has no location; refreshing");
                CacheState::PresentInvalid
            }
            (state, _) => state,
        };

        self.refresh(providers, loaded.unwrap_or_default(), state, requested, now)
    }

    fn refresh<P: WeatherApi>(
        &self,
        providers: &P,
        entry: CacheEntry,
        state: CacheState,
        requested: &str,
        now: DateTime<Utc>,
    ) -> Result<WeatherReport, WeatherError> {
        let location = match entry.location {
            Some(location) => {
                debug!(
                    location = requested,
                    cached_for = %entry.cached_location,
                    "reusing cached coordinates"
                );
                location
            }
            None => providers.resolve_location(requested)?,
        };

        let conditions = providers.fetch_conditions(location.lat, location.lon)?;
        let expires_at = now
            .checked_add_signed(self.ttl())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        write_cache(
            &self.path,
            &CacheEntry {
                location: Some(location.clone()),
                weather: Some(conditions.clone()),
                cached_location: requested.to_string(),
                cache_expires_at: Some(expires_at),
            },
        )?;
        info!(
            path = %self.path.display(),
            location = requested,
            expires_at = %expires_at,
            "refreshed weather cache"
        );

        Ok(WeatherReport {
            location,
            conditions,
            expires_at,
            state,
            refreshed: true,
        })
    }

    fn ttl(&self) -> Duration {
        i64::try_from(self.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

fn reuse(entry: &CacheEntry) -> Option<WeatherReport> {
    Some(WeatherReport {
        location: entry.location.clone()?,
        conditions: entry.weather.clone()?,
        expires_at: entry.cache_expires_at?,
        state: CacheState::PresentValid,
        refreshed: false,
    })
}
