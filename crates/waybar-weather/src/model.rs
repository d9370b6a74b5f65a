use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geocoded place. Field names follow the OpenWeatherMap geocoding payload
/// so the same struct is used on the wire and in the cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
}

/// Epoch seconds, as delivered by the conditions endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current conditions for one location. Replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSnapshot {
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub main: Readings,
    #[serde(default)]
    pub sys: SunTimes,
}

impl ConditionSnapshot {
    pub fn primary(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sys.sunrise, 0)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sys.sunset, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub location: String,
    pub token: String,
}

impl WeatherRequest {
    pub fn new(location: Option<&str>, token: Option<&str>) -> Result<Self, ValidationError> {
        let location = location
            .ok_or(ValidationError::MissingLocation)
            .and_then(normalize_location)?;
        let token = token
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingToken)?;

        Ok(Self {
            location,
            token: token.to_string(),
        })
    }
}

pub fn normalize_location(raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyLocation);
    }
    Ok(value.to_string())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing location: use --location or WAYBAR_WEATHER_LOCATION")]
    MissingLocation,
    #[error("location must not be empty")]
    EmptyLocation,
    #[error("missing API token: use --token or OPENWEATHER_API_TOKEN")]
    MissingToken,
}
