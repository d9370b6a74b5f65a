use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;
use crate::model::{ConditionSnapshot, Location};

/// The persisted cache document: one location at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub weather: Option<ConditionSnapshot>,
    #[serde(default)]
    pub cached_location: String,
    #[serde(default)]
    pub cache_expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Snapshot present, built for `requested`, and `now` strictly before the
    /// expiry.
    pub fn is_valid(&self, requested: &str, now: DateTime<Utc>) -> bool {
        self.weather.is_some()
            && self.cached_location == requested
            && self
                .cache_expires_at
                .is_some_and(|expires_at| now < expires_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Missing,
    PresentInvalid,
    PresentValid,
}

impl CacheState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::PresentInvalid => "present_invalid",
            Self::PresentValid => "present_valid",
        }
    }
}

pub fn classify(entry: Option<&CacheEntry>, requested: &str, now: DateTime<Utc>) -> CacheState {
    match entry {
        None => CacheState::Missing,
        Some(entry) if entry.is_valid(requested, now) => CacheState::PresentValid,
        Some(_) => CacheState::PresentInvalid,
    }
}

/// `Ok(None)` when the file does not exist or holds only whitespace. A file
/// with content that does not parse is an error, not a miss.
pub fn read_cache(path: &Path) -> Result<Option<CacheEntry>, WeatherError> {
    let payload = match fs::read_to_string(path) {
        Ok(payload) => payload,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(WeatherError::persistence(path, error)),
    };

    if payload.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<CacheEntry>(&payload)
        .map(Some)
        .map_err(|error| WeatherError::Decode {
            context: format!("cache file {}", path.display()),
            message: error.to_string(),
        })
}

pub fn write_cache(path: &Path, entry: &CacheEntry) -> Result<(), WeatherError> {
    let payload =
        serde_json::to_vec(entry).map_err(|error| WeatherError::persistence(path, error))?;
    write_atomic(path, &payload).map_err(|error| WeatherError::persistence(path, error))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "cache path must have a parent directory",
        )
    })?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension(format!("{}.tmp", std::process::id()));
    let result = fs::write(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
