use std::time::Duration;

use crate::config::QUERY_TIMEOUT_SECS;
use crate::error::WeatherError;
use crate::forecast;
use crate::geocoding;
use crate::http::QueryClient;
use crate::model::{ConditionSnapshot, Location};

/// The two upstream calls a refresh may need. The cache store only talks to
/// this trait, so tests substitute counting fakes.
pub trait WeatherApi {
    fn resolve_location(&self, name: &str) -> Result<Location, WeatherError>;
    fn fetch_conditions(&self, lat: f64, lon: f64) -> Result<ConditionSnapshot, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: QueryClient,
    base_url: String,
    token: String,
}

impl OpenWeatherProvider {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_timeout(base_url, token, Duration::from_secs(QUERY_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        Ok(Self {
            client: QueryClient::new(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl WeatherApi for OpenWeatherProvider {
    fn resolve_location(&self, name: &str) -> Result<Location, WeatherError> {
        geocoding::resolve_location(&self.client, &self.base_url, name, &self.token)
    }

    fn fetch_conditions(&self, lat: f64, lon: f64) -> Result<ConditionSnapshot, WeatherError> {
        forecast::fetch_conditions(&self.client, &self.base_url, lat, lon, &self.token)
    }
}
